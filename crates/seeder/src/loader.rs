use serde_json::Value;
use sqlx::PgPool;
use storage::{
    models::{FundingOpportunity, Investor},
    repository::{funding_opportunity::FundingOpportunityRepository, investor::InvestorRepository},
    services::classification,
};
use tracing::info;

use crate::{Result, SeedKind};

/// Records committed per transaction.
pub const BATCH_SIZE: usize = 10;

/// Validated records, typed for the table they go into.
#[derive(Debug)]
pub enum Dataset {
    Opportunities(Vec<FundingOpportunity>),
    Investors(Vec<Investor>),
}

impl Dataset {
    pub fn from_records(kind: SeedKind, records: Vec<Value>) -> Result<Self> {
        let records = Value::Array(records);
        Ok(match kind {
            SeedKind::Opportunities => {
                let mut opportunities: Vec<FundingOpportunity> = serde_json::from_value(records)?;
                opportunities.iter_mut().for_each(fill_derived_fields);
                Self::Opportunities(opportunities)
            }
            SeedKind::Investors => Self::Investors(serde_json::from_value(records)?),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Opportunities(items) => items.len(),
            Self::Investors(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classification flags are computed when the source leaves them out.
fn fill_derived_fields(opportunity: &mut FundingOpportunity) {
    if opportunity.funding_type.is_none() {
        opportunity.funding_type =
            Some(classification::derive_funding_type(&opportunity.sector).to_string());
    }
    opportunity.is_early_stage = opportunity.is_early_stage
        || classification::is_early_stage(&opportunity.sector, &opportunity.description);
    opportunity.is_impact_focused = opportunity.is_impact_focused
        || classification::is_impact_focused(&opportunity.sector, &opportunity.description);
}

pub struct SeedLoader<'a> {
    pool: &'a PgPool,
}

impl<'a> SeedLoader<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Upsert every record, one transaction per batch. Returns the number written.
    pub async fn load(&self, dataset: &Dataset) -> Result<usize> {
        match dataset {
            Dataset::Opportunities(items) => {
                for (idx, batch) in items.chunks(BATCH_SIZE).enumerate() {
                    let mut tx = self.pool.begin().await?;
                    for opportunity in batch {
                        FundingOpportunityRepository::upsert(opportunity, &mut tx).await?;
                    }
                    tx.commit().await?;
                    info!("Batch {} committed ({} opportunities)", idx + 1, batch.len());
                }
            }
            Dataset::Investors(items) => {
                for (idx, batch) in items.chunks(BATCH_SIZE).enumerate() {
                    let mut tx = self.pool.begin().await?;
                    for investor in batch {
                        InvestorRepository::upsert(investor, &mut tx).await?;
                    }
                    tx.commit().await?;
                    info!("Batch {} committed ({} investors)", idx + 1, batch.len());
                }
            }
        }

        Ok(dataset.len())
    }
}
