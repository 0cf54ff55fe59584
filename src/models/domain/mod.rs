pub mod article;
pub mod ebook;
pub mod media;
pub mod page;
pub mod paper;
pub mod quiz;
pub mod quiz_attempt;
pub mod refresh_token;
pub mod subscription;
pub mod taxonomy;
pub mod user;

pub use article::{Article, ArticleDetail};
pub use ebook::Ebook;
pub use media::Media;
pub use page::Page;
pub use paper::PreviousPaper;
pub use quiz::{Quiz, QuizQuestion};
pub use quiz_attempt::{AnswerInput, QuizAttempt};
pub use refresh_token::RefreshToken;
pub use subscription::Subscription;
pub use taxonomy::{Category, Subcategory};
pub use user::User;
