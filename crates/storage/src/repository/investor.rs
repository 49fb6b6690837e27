use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::error::{Result, StorageError};
use crate::models::{FundingStage, Investor};

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, investor_type, stages, description, focus_sectors,
           investment_range, location, website, logo_url
    FROM investors
"#;

#[derive(FromRow)]
struct InvestorRow {
    id: String,
    name: String,
    investor_type: String,
    stages: Vec<i16>,
    description: String,
    focus_sectors: Vec<String>,
    investment_range: Option<String>,
    location: Option<String>,
    website: Option<String>,
    logo_url: Option<String>,
}

impl From<InvestorRow> for Investor {
    fn from(row: InvestorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            investor_type: row.investor_type,
            // stages outside 0..=4 are dropped
            stages: row
                .stages
                .into_iter()
                .filter_map(FundingStage::from_db)
                .collect(),
            description: row.description,
            focus_sectors: row.focus_sectors,
            investment_range: row.investment_range,
            location: row.location,
            website: row.website,
            logo_url: row.logo_url,
        }
    }
}

pub struct InvestorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InvestorRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Investor>> {
        let rows = sqlx::query_as::<_, InvestorRow>(&format!("{} ORDER BY name", SELECT_COLUMNS))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Investor::from).collect())
    }

    /// Find investor by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Investor> {
        let row = sqlx::query_as::<_, InvestorRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    pub async fn upsert(investor: &Investor, tx: &mut Transaction<'_, Postgres>) -> Result<()> {
        let stages: Vec<i16> = investor.stages.iter().map(|s| s.as_db()).collect();

        sqlx::query(
            r#"
            INSERT INTO investors (
                id, name, investor_type, stages, description, focus_sectors,
                investment_range, location, website, logo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                investor_type = EXCLUDED.investor_type,
                stages = EXCLUDED.stages,
                description = EXCLUDED.description,
                focus_sectors = EXCLUDED.focus_sectors,
                investment_range = EXCLUDED.investment_range,
                location = EXCLUDED.location,
                website = EXCLUDED.website,
                logo_url = EXCLUDED.logo_url,
                updated_at = NOW()
            "#,
        )
        .bind(&investor.id)
        .bind(&investor.name)
        .bind(&investor.investor_type)
        .bind(&stages)
        .bind(&investor.description)
        .bind(&investor.focus_sectors)
        .bind(&investor.investment_range)
        .bind(&investor.location)
        .bind(&investor.website)
        .bind(&investor.logo_url)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
