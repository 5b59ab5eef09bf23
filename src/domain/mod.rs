pub mod article;

pub use article::{NewsArticle, RawArticle, DESCRIPTION_PLACEHOLDER, PICTURE_PLACEHOLDER};
