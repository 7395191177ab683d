//! Demo data for a freshly created database.
//!
//! Inserts two categories, eight books, one administrator and two comments, each
//! group committed on its own. Not idempotent: a second run inserts everything
//! again, and a failure part-way keeps the groups already committed.

use crate::{
    config::SeedConfig,
    core::{
        category::create_category,
        comment::add_comment,
        product::{NewProduct, create_product},
        user::{NewUser, create_user},
    },
    entities::UserRole,
    errors::Result,
};
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{info, instrument};

/// Names of the seeded categories, in insertion order
pub const CATEGORY_NAMES: [&str; 2] = ["Sách bán chạy", "Sách mới nhập"];

/// One seeded book
struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: f64,
    image: &'static str,
    /// Index into [`CATEGORY_NAMES`]
    category: usize,
}

const PRODUCTS: [SeedProduct; 8] = [
    SeedProduct {
        name: "Mắt biếc",
        description: "Truyện dài",
        price: 110_000.0,
        image: "https://upload.wikimedia.org/wikipedia/vi/9/92/Mat_Biec.gif",
        category: 0,
    },
    SeedProduct {
        name: "Út Quyên và tôi",
        description: "Tập truyện",
        price: 72_250.0,
        image: "https://www.nxbtre.com.vn/Images/Book/copy_21_NXBTreStoryFull_04112014_021101.jpg",
        category: 1,
    },
    SeedProduct {
        name: "Trước vòng chung kết",
        description: "Truyện dài",
        price: 102_000.0,
        image: "https://quang.name.vn/wp-content/uploads/2020/05/truoc-vong-chung-ket.jpg",
        category: 0,
    },
    SeedProduct {
        name: "Nữ sinh",
        description: "Truyện dài",
        price: 72_250.0,
        image: "https://isach.info/images/story/cover/nu_sinh__nguyen_nhat_anh.jpg",
        category: 1,
    },
    SeedProduct {
        name: "Thằng quỷ nhỏ",
        description: "Truyện dài",
        price: 93_500.0,
        image: "https://nhungcuonsachhay.com/wp-content/uploads/2021/05/Thang-quy-nho-Nguyen-Nhat-Anh.jpg",
        category: 0,
    },
    SeedProduct {
        name: "Chú bé rắc rối",
        description: "Truyện dài",
        price: 70_300.0,
        image: "http://isach.info/images/story/cover/chu_be_rac_roi__nguyen_nhat_anh.jpg",
        category: 1,
    },
    SeedProduct {
        name: "Kính vạn hoa 2",
        description: "Tập truyện",
        price: 88_000.0,
        image: "https://salt.tikicdn.com/media/catalog/product/k/v/kvh_18tap_2.jpg",
        category: 1,
    },
    SeedProduct {
        name: "Kính vạn hoa 6",
        description: "Tập truyện",
        price: 76_500.0,
        image: "https://salt.tikicdn.com/media/catalog/product/k/v/kvh_18tap_6.jpg",
        category: 1,
    },
];

/// Comments the administrator leaves on the first book
pub const COMMENTS: [&str; 2] = ["Good", "Nice"];

/// Display name of the seeded administrator
pub const ADMIN_NAME: &str = "Administrator";

/// Row counts inserted by [`seed_demo_data`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Categories inserted
    pub categories: usize,
    /// Products inserted
    pub products: usize,
    /// Users inserted
    pub users: usize,
    /// Comments inserted
    pub comments: usize,
}

/// Seeds the demo catalogue, administrator and comments.
#[instrument(skip(db, seed))]
pub async fn seed_demo_data<C>(db: &C, seed: &SeedConfig) -> Result<SeedSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut summary = SeedSummary::default();

    let txn = db.begin().await?;
    let mut category_ids = Vec::with_capacity(CATEGORY_NAMES.len());
    for name in CATEGORY_NAMES {
        category_ids.push(create_category(&txn, name).await?.id);
    }
    txn.commit().await?;
    summary.categories = category_ids.len();
    info!(count = summary.categories, "Seeded categories");

    let txn = db.begin().await?;
    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for product in &PRODUCTS {
        let new_product = NewProduct {
            description: Some(product.description.to_string()),
            price: product.price,
            image: Some(product.image.to_string()),
            ..NewProduct::new(product.name, category_ids[product.category])
        };
        product_ids.push(create_product(&txn, new_product).await?.id);
    }
    txn.commit().await?;
    summary.products = product_ids.len();
    info!(count = summary.products, "Seeded products");

    let txn = db.begin().await?;
    let admin = create_user(
        &txn,
        NewUser {
            role: UserRole::Admin,
            ..NewUser::new(
                ADMIN_NAME,
                seed.admin_username.as_str(),
                seed.admin_password.as_str(),
                seed.admin_avatar.as_str(),
            )
        },
    )
    .await?;
    txn.commit().await?;
    summary.users = 1;
    info!(id = admin.id, username = %admin.username, "Seeded administrator");

    let txn = db.begin().await?;
    for content in COMMENTS {
        add_comment(&txn, admin.id, product_ids[0], content).await?;
    }
    txn.commit().await?;
    summary.comments = COMMENTS.len();
    info!(count = summary.comments, "Seeded comments");

    Ok(summary)
}
