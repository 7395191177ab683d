//! Product comments.

use crate::{
    core::validation::{COMMENT_MAX_LEN, required_text},
    entities::{Comment, comment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::instrument;

/// Posts a comment by `user_id` on `product_id`, stamped with the current time.
///
/// # Errors
/// Returns an error if the content is blank or longer than 255 characters, or
/// if the user or product does not exist.
#[instrument(skip(db, content))]
pub async fn add_comment<C>(
    db: &C,
    user_id: i32,
    product_id: i32,
    content: &str,
) -> Result<comment::Model>
where
    C: ConnectionTrait,
{
    let content = required_text("content", content, COMMENT_MAX_LEN)?;

    let comment = comment::ActiveModel {
        content: Set(content),
        created_date: Set(chrono::Utc::now().naive_utc()),
        user_id: Set(user_id),
        product_id: Set(product_id),
        ..Default::default()
    };
    comment.insert(db).await.map_err(Into::into)
}

/// Comments on a product, newest first.
pub async fn comments_for_product<C>(
    db: &C,
    product_id: i32,
) -> Result<Vec<comment::Model>>
where
    C: ConnectionTrait,
{
    Comment::find()
        .filter(comment::Column::ProductId.eq(product_id))
        .order_by_desc(comment::Column::CreatedDate)
        .order_by_desc(comment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Comments written by a user, newest first.
pub async fn comments_by_user<C>(
    db: &C,
    user_id: i32,
) -> Result<Vec<comment::Model>>
where
    C: ConnectionTrait,
{
    Comment::find()
        .filter(comment::Column::UserId.eq(user_id))
        .order_by_desc(comment::Column::CreatedDate)
        .order_by_desc(comment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a single comment.
pub async fn delete_comment<C>(db: &C, comment_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Comment::delete_by_id(comment_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "comment",
            id: comment_id,
        });
    }
    Ok(())
}
