pub mod report;
pub mod token_record;
