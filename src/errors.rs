use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("tax ID already registered")]
    DuplicateTaxId,
    #[error("name and address already registered")]
    DuplicateNameAddress,
    #[error("company not found")]
    CompanyNotFound,
    #[error("actor communication failed")]
    ActorCommunication,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("shifting by {days} days leaves the calendar")]
    OutOfRange { days: i64 },
    #[error("cannot parse date: {0}")]
    Parse(String),
}
