pub mod index;
pub mod page;

pub use page::{FormView, render_site_page};
