pub mod assessment;
pub mod compliance;
pub mod sars;

pub use assessment::{compute_tax, TaxAssessment};
pub use compliance::{classify, ComplianceStatus, RegistrationState, Severity};
pub use sars::{TaxBracket, TaxYear, TaxYearConfig};
