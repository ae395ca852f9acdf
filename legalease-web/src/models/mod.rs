pub mod context;
pub mod forms;
pub mod view;

pub use context::{Layout, RequestContext, WebSessionStore};
pub use forms::{LoginForm, NextParam, RegisterForm};
pub use view::ResultTab;
