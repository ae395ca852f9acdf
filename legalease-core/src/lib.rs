//! legalease-core: session handling, backend gateways and navigation rules
//! shared by the LegalEase front end.
pub mod error;
pub mod gateway;
pub mod http;
pub mod models;
pub mod observability;
pub mod routing;
pub mod session;
pub mod upload;

pub use error::ClientError;
pub use gateway::{AuthGateway, DocumentGateway};
pub use http::{ApiClient, TokenSource};
pub use session::{MemoryStorage, Session, SessionStorage, SessionStore};

pub use async_trait;
pub use secrecy;
