pub mod cli;
pub mod csv_io;
pub mod date;
pub mod errors;
pub mod models;
pub mod register;
pub mod register_actor;

pub use date::CalendarDate;
pub use errors::{DateError, RegisterError};
pub use models::{Company, CommandOutput, CommandRow, CommandType, CompanyRef};
pub use register::VatRegister;
pub use register_actor::RegisterHandle;
