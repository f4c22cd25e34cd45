pub mod audit;
pub mod booking;
pub mod catalog;
pub mod intake;
pub mod links;
pub mod notify;
pub mod render;

pub use crate::domain::model::{
    ConsultationRequest, PageEntry, Region, RelatedLinks, SubmissionResponse, SubmitStatus,
};
pub use crate::domain::ports::{ConfigProvider, Storage, SubmissionTransport};
pub use crate::utils::error::Result;
