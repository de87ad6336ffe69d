//! SeaORM entity models and API views
//!
//! Database entities for Newsroom

mod article;
mod category;
mod journalist;
mod views;

pub use article::{
    Entity as ArticleEntity,
    Model as ArticleModel,
    ActiveModel as ArticleActiveModel,
    Column as ArticleColumn,
};

pub use category::{
    Entity as CategoryEntity,
    Model as Category,
    ActiveModel as CategoryActiveModel,
    Column as CategoryColumn,
};

pub use journalist::{
    Entity as JournalistEntity,
    Model as Journalist,
    ActiveModel as JournalistActiveModel,
    Column as JournalistColumn,
};

pub use views::{
    Article,
    ArticleInput,
    ArticleWithJournalist,
    JournalistArticle,
    SavedArticle,
};
