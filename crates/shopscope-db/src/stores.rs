//! Database operations for `stores` and the per-store child tables.
//!
//! A store record is written as one `stores` row plus child rows. Saving is
//! always a full replace inside one transaction: the old `stores` row is
//! deleted (children cascade) and the new aggregate inserted.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use shopscope_core::{
    ContactInfo, ImportantLink, Policy, PolicyKind, ProductListing, QaPair, SocialHandle,
    SocialPlatform, StoreRecord, StoreRepository,
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::DbError;

const SOURCE_CATALOG: &str = "catalog";
const SOURCE_HERO: &str = "hero";
const CONTACT_EMAIL: &str = "email";
const CONTACT_PHONE: &str = "phone";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `stores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRow {
    pub id: i64,
    pub public_id: Uuid,
    pub origin: String,
    pub display_name: Option<String>,
    pub about_text: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A row from `store_products`. `source` is `"catalog"` or `"hero"`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreProductRow {
    pub source: String,
    pub position: i32,
    pub title: String,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub description: Option<String>,
    pub product_type: Option<String>,
}

/// A row from `store_policies`. `kind` holds [`PolicyKind::as_str`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StorePolicyRow {
    pub kind: String,
    pub title: String,
    pub content: String,
    pub url: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreFaqRow {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreSocialHandleRow {
    pub platform: String,
    pub url: String,
    pub username: Option<String>,
}

/// A row from `store_contacts`. `kind` is `"email"` or `"phone"`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreContactRow {
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreImportantLinkRow {
    pub label: String,
    pub url: String,
}

/// Child rows of one store, each list in stored order.
#[derive(Debug, Clone, Default)]
pub struct StoreChildren {
    pub products: Vec<StoreProductRow>,
    pub policies: Vec<StorePolicyRow>,
    pub faqs: Vec<StoreFaqRow>,
    pub social_handles: Vec<StoreSocialHandleRow>,
    pub contacts: Vec<StoreContactRow>,
    pub important_links: Vec<StoreImportantLinkRow>,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Replaces everything stored for `record.origin` with `record`.
///
/// Returns the internal `id` of the new `stores` row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction is
/// rolled back and the previous record stays in place.
pub async fn replace_store(pool: &PgPool, record: &StoreRecord) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM stores WHERE origin = $1")
        .bind(&record.origin)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let store_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO stores (public_id, origin, display_name, about_text, fetched_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(&record.origin)
    .bind(&record.display_name)
    .bind(&record.about_text)
    .bind(record.fetched_at)
    .fetch_one(&mut *tx)
    .await?;

    insert_products(&mut tx, store_id, SOURCE_CATALOG, &record.catalog).await?;
    insert_products(&mut tx, store_id, SOURCE_HERO, &record.hero_products).await?;

    for kind in [PolicyKind::Privacy, PolicyKind::ReturnRefund] {
        let Some(policy) = record.policy(kind) else {
            continue;
        };
        sqlx::query(
            "INSERT INTO store_policies (store_id, kind, title, content, url) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(store_id)
        .bind(kind.as_str())
        .bind(&policy.title)
        .bind(&policy.content)
        .bind(&policy.url)
        .execute(&mut *tx)
        .await?;
    }

    for (index, faq) in record.faqs.iter().enumerate() {
        sqlx::query(
            "INSERT INTO store_faqs (store_id, position, question, answer) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(store_id)
        .bind(position(index))
        .bind(&faq.question)
        .bind(&faq.answer)
        .execute(&mut *tx)
        .await?;
    }

    for (index, handle) in record.social_handles.iter().enumerate() {
        sqlx::query(
            "INSERT INTO store_social_handles (store_id, position, platform, url, username) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(store_id)
        .bind(position(index))
        .bind(handle.platform.as_str())
        .bind(&handle.url)
        .bind(&handle.username)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(contact) = &record.contact_details {
        let values = contact
            .emails
            .iter()
            .map(|v| (CONTACT_EMAIL, v))
            .chain(contact.phone_numbers.iter().map(|v| (CONTACT_PHONE, v)));
        for (kind, value) in values {
            sqlx::query("INSERT INTO store_contacts (store_id, kind, value) VALUES ($1, $2, $3)")
                .bind(store_id)
                .bind(kind)
                .bind(value)
                .execute(&mut *tx)
                .await?;
        }
    }

    for (index, link) in record.important_links.iter().enumerate() {
        sqlx::query(
            "INSERT INTO store_important_links (store_id, position, label, url) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(store_id)
        .bind(position(index))
        .bind(&link.label)
        .bind(&link.url)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::debug!(origin = %record.origin, store_id, replaced = removed > 0, "store saved");
    Ok(store_id)
}

async fn insert_products(
    tx: &mut Transaction<'_, Postgres>,
    store_id: i64,
    source: &str,
    products: &[ProductListing],
) -> Result<(), DbError> {
    for (index, product) in products.iter().enumerate() {
        sqlx::query(
            "INSERT INTO store_products \
                 (store_id, source, position, title, price, currency, \
                  image_url, product_url, description, product_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(store_id)
        .bind(source)
        .bind(position(index))
        .bind(&product.title)
        .bind(&product.price)
        .bind(&product.currency)
        .bind(&product.image_url)
        .bind(&product.product_url)
        .bind(&product.description)
        .bind(&product.product_type)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetches the `stores` row for a normalized origin.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_store_by_origin(pool: &PgPool, origin: &str) -> Result<Option<StoreRow>, DbError> {
    let row = sqlx::query_as::<_, StoreRow>(
        "SELECT id, public_id, origin, display_name, about_text, fetched_at, created_at \
         FROM stores WHERE origin = $1",
    )
    .bind(origin)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Loads and reassembles the full record stored for `origin`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails, or [`DbError::InvalidValue`]
/// if a stored platform or policy kind is unknown.
pub async fn load_store_record(pool: &PgPool, origin: &str) -> Result<Option<StoreRecord>, DbError> {
    let Some(store) = get_store_by_origin(pool, origin).await? else {
        return Ok(None);
    };

    let products = sqlx::query_as::<_, StoreProductRow>(
        "SELECT source, position, title, price, currency, image_url, product_url, \
                description, product_type \
         FROM store_products WHERE store_id = $1 ORDER BY source, position",
    )
    .bind(store.id)
    .fetch_all(pool)
    .await?;

    let policies = sqlx::query_as::<_, StorePolicyRow>(
        "SELECT kind, title, content, url FROM store_policies WHERE store_id = $1",
    )
    .bind(store.id)
    .fetch_all(pool)
    .await?;

    let faqs = sqlx::query_as::<_, StoreFaqRow>(
        "SELECT question, answer FROM store_faqs WHERE store_id = $1 ORDER BY position",
    )
    .bind(store.id)
    .fetch_all(pool)
    .await?;

    let social_handles = sqlx::query_as::<_, StoreSocialHandleRow>(
        "SELECT platform, url, username FROM store_social_handles \
         WHERE store_id = $1 ORDER BY position",
    )
    .bind(store.id)
    .fetch_all(pool)
    .await?;

    let contacts = sqlx::query_as::<_, StoreContactRow>(
        "SELECT kind, value FROM store_contacts WHERE store_id = $1",
    )
    .bind(store.id)
    .fetch_all(pool)
    .await?;

    let important_links = sqlx::query_as::<_, StoreImportantLinkRow>(
        "SELECT label, url FROM store_important_links WHERE store_id = $1 ORDER BY position",
    )
    .bind(store.id)
    .fetch_all(pool)
    .await?;

    let children = StoreChildren {
        products,
        policies,
        faqs,
        social_handles,
        contacts,
        important_links,
    };
    assemble_record(store, children).map(Some)
}

/// Rebuilds a [`StoreRecord`] from its stored rows.
///
/// Products are split by `source` and ordered by `position`. An empty
/// contact set becomes `None`, matching how records are built.
///
/// # Errors
///
/// Returns [`DbError::InvalidValue`] for an unknown platform or policy kind.
pub fn assemble_record(store: StoreRow, children: StoreChildren) -> Result<StoreRecord, DbError> {
    let mut catalog = Vec::new();
    let mut hero_products = Vec::new();
    let mut products = children.products;
    products.sort_by_key(|p| p.position);
    for row in products {
        let target = if row.source == SOURCE_HERO {
            &mut hero_products
        } else {
            &mut catalog
        };
        target.push(ProductListing {
            title: row.title,
            price: row.price,
            currency: row.currency,
            image_url: row.image_url,
            product_url: row.product_url,
            description: row.description,
            product_type: row.product_type,
        });
    }

    let mut privacy_policy = None;
    let mut return_refund_policy = None;
    for row in children.policies {
        let policy = Policy {
            title: row.title,
            content: row.content,
            url: row.url,
        };
        match row.kind.parse::<PolicyKind>()? {
            PolicyKind::Privacy => privacy_policy = Some(policy),
            PolicyKind::ReturnRefund => return_refund_policy = Some(policy),
        }
    }

    let social_handles = children
        .social_handles
        .into_iter()
        .map(|row| {
            Ok(SocialHandle {
                platform: row.platform.parse::<SocialPlatform>()?,
                url: row.url,
                username: row.username,
            })
        })
        .collect::<Result<Vec<_>, DbError>>()?;

    let mut emails = BTreeSet::new();
    let mut phone_numbers = BTreeSet::new();
    for row in children.contacts {
        if row.kind == CONTACT_PHONE {
            phone_numbers.insert(row.value);
        } else {
            emails.insert(row.value);
        }
    }
    let contact = ContactInfo {
        emails,
        phone_numbers,
    };

    Ok(StoreRecord {
        origin: store.origin,
        display_name: store.display_name,
        catalog,
        hero_products,
        privacy_policy,
        return_refund_policy,
        faqs: children
            .faqs
            .into_iter()
            .map(|row| QaPair {
                question: row.question,
                answer: row.answer,
            })
            .collect(),
        social_handles,
        contact_details: (!contact.is_empty()).then_some(contact),
        about_text: store.about_text,
        important_links: children
            .important_links
            .into_iter()
            .map(|row| ImportantLink {
                label: row.label,
                url: row.url,
            })
            .collect(),
        fetched_at: store.fetched_at,
    })
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// [`StoreRepository`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl StoreRepository for PgStoreRepository {
    type Error = DbError;

    async fn save(&self, record: &StoreRecord) -> Result<(), Self::Error> {
        replace_store(&self.pool, record).await.map(|_| ())
    }

    async fn load(&self, origin: &str) -> Result<Option<StoreRecord>, Self::Error> {
        load_store_record(&self.pool, origin).await
    }
}
