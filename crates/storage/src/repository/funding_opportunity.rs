use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::error::{Result, StorageError};
use crate::models::{DisplayType, FundingOpportunity, OpportunityDetails};

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, fund_provider, sector, amount_description, amount_min, amount_max,
           location, description, relevant_links, display_type, image_url, equity,
           program_support, funding_type, is_early_stage, is_impact_focused, details
    FROM funding_opportunities
"#;

#[derive(FromRow)]
struct FundingOpportunityRow {
    id: String,
    title: String,
    fund_provider: String,
    sector: String,
    amount_description: String,
    amount_min: Option<Decimal>,
    amount_max: Option<Decimal>,
    location: String,
    description: String,
    relevant_links: Vec<String>,
    display_type: String,
    image_url: Option<String>,
    equity: Option<String>,
    program_support: bool,
    funding_type: Option<String>,
    is_early_stage: bool,
    is_impact_focused: bool,
    details: Option<Json<OpportunityDetails>>,
}

impl From<FundingOpportunityRow> for FundingOpportunity {
    fn from(row: FundingOpportunityRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            fund_provider: row.fund_provider,
            sector: row.sector,
            amount_description: row.amount_description,
            amount_min: row.amount_min,
            amount_max: row.amount_max,
            location: row.location,
            description: row.description,
            relevant_links: row.relevant_links,
            display_type: DisplayType::parse(&row.display_type),
            image_url: row.image_url,
            equity: row.equity,
            program_support: row.program_support,
            funding_type: row.funding_type,
            is_early_stage: row.is_early_stage,
            is_impact_focused: row.is_impact_focused,
            details: row.details.map(|d| d.0),
        }
    }
}

pub struct FundingOpportunityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FundingOpportunityRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all opportunities, newest first
    pub async fn list(&self) -> Result<Vec<FundingOpportunity>> {
        let rows = sqlx::query_as::<_, FundingOpportunityRow>(&format!(
            "{} ORDER BY created_at DESC, id",
            SELECT_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(FundingOpportunity::from).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<FundingOpportunity> {
        let row = sqlx::query_as::<_, FundingOpportunityRow>(&format!(
            "{} WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// Fetch several opportunities at once; unknown ids are skipped
    pub async fn find_many(&self, ids: &[String]) -> Result<Vec<FundingOpportunity>> {
        let rows = sqlx::query_as::<_, FundingOpportunityRow>(&format!(
            "{} WHERE id = ANY($1) ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(FundingOpportunity::from).collect())
    }

    /// Insert or refresh a reference record inside the caller's transaction
    pub async fn upsert(
        opportunity: &FundingOpportunity,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO funding_opportunities (
                id, title, fund_provider, sector, amount_description, amount_min, amount_max,
                location, description, relevant_links, display_type, image_url, equity,
                program_support, funding_type, is_early_stage, is_impact_focused, details
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                fund_provider = EXCLUDED.fund_provider,
                sector = EXCLUDED.sector,
                amount_description = EXCLUDED.amount_description,
                amount_min = EXCLUDED.amount_min,
                amount_max = EXCLUDED.amount_max,
                location = EXCLUDED.location,
                description = EXCLUDED.description,
                relevant_links = EXCLUDED.relevant_links,
                display_type = EXCLUDED.display_type,
                image_url = EXCLUDED.image_url,
                equity = EXCLUDED.equity,
                program_support = EXCLUDED.program_support,
                funding_type = EXCLUDED.funding_type,
                is_early_stage = EXCLUDED.is_early_stage,
                is_impact_focused = EXCLUDED.is_impact_focused,
                details = EXCLUDED.details,
                updated_at = NOW()
            "#,
        )
        .bind(&opportunity.id)
        .bind(&opportunity.title)
        .bind(&opportunity.fund_provider)
        .bind(&opportunity.sector)
        .bind(&opportunity.amount_description)
        .bind(opportunity.amount_min)
        .bind(opportunity.amount_max)
        .bind(&opportunity.location)
        .bind(&opportunity.description)
        .bind(&opportunity.relevant_links)
        .bind(opportunity.display_type.as_str())
        .bind(&opportunity.image_url)
        .bind(&opportunity.equity)
        .bind(opportunity.program_support)
        .bind(&opportunity.funding_type)
        .bind(opportunity.is_early_stage)
        .bind(opportunity.is_impact_focused)
        .bind(opportunity.details.as_ref().map(Json))
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
