//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod comment;
pub mod product;
pub mod product_tag;
pub mod receipt;
pub mod receipt_details;
pub mod tag;
pub mod user;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use comment::{Column as CommentColumn, Entity as Comment, Model as CommentModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_tag::{Column as ProductTagColumn, Entity as ProductTag, Model as ProductTagModel};
pub use receipt::{Column as ReceiptColumn, Entity as Receipt, Model as ReceiptModel};
pub use receipt_details::{
    Column as ReceiptDetailsColumn, Entity as ReceiptDetails, Model as ReceiptDetailsModel,
};
pub use tag::{Column as TagColumn, Entity as Tag, Model as TagModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, UserRole};
