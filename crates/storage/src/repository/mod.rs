pub mod achievement;
pub mod connection;
pub mod discovery;
pub mod feedback;
pub mod funding_opportunity;
pub mod investor;
pub mod notification;
pub mod pitch;
pub mod saved_opportunity;
pub mod user_progress;

use crate::error::{Result, StorageError};
use crate::models::FundingStage;

pub(crate) fn decode_stage(value: i16) -> Result<FundingStage> {
    FundingStage::from_db(value).ok_or_else(|| {
        StorageError::Database(sqlx::Error::Decode(
            format!("invalid funding stage {}", value).into(),
        ))
    })
}
