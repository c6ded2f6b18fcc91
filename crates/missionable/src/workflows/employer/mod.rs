//! Employer inquiry intake. Inquiries are write-only from the site's side.

pub mod intake;

pub use intake::{EmployerInquiry, EmployerInquiryService, InquiryError, InquiryForm};
