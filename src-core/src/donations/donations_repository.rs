use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::donations::donations_model::{
    Donation, DonationChanges, DonationTotals, NewDonation,
};
use crate::donations::donations_traits::DonationRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::schema::donations;
use crate::schema::donations::dsl::*;

pub struct DonationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DonationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DonationRepository { pool, writer }
    }
}

/// Fails when another live donation already holds the word. Runs inside the
/// writer transaction, which makes word uniqueness a hard invariant.
fn check_word_free(
    conn: &mut SqliteConnection,
    word: &str,
    exclude_id: Option<i32>,
) -> Result<()> {
    let mut query = donations.filter(premium_word_id.eq(word)).into_boxed();
    if let Some(own_id) = exclude_id {
        query = query.filter(id.ne(own_id));
    }
    let holders: i64 = query.count().get_result(conn)?;
    if holders > 0 {
        return Err(ValidationError::InvalidInput(format!(
            "premium word '{}' is already taken",
            word
        ))
        .into());
    }
    Ok(())
}

#[async_trait]
impl DonationRepositoryTrait for DonationRepository {
    fn list(&self) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donations
            .order((created_at.desc(), id.desc()))
            .load::<Donation>(&mut conn)?)
    }

    fn find_by_id(&self, donation_id: i32) -> Result<Option<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donations.find(donation_id).first(&mut conn).optional()?)
    }

    fn totals(&self) -> Result<DonationTotals> {
        let mut conn = get_connection(&self.pool)?;
        let (total, count): (Option<i64>, i64) = donations
            .select((
                diesel::dsl::sql::<diesel::sql_types::Nullable<diesel::sql_types::BigInt>>(
                    "SUM(amount)",
                ),
                count_star(),
            ))
            .first(&mut conn)?;
        Ok(DonationTotals {
            total_amount: total.unwrap_or(0),
            donation_count: count,
        })
    }

    async fn insert(&self, new_donation: NewDonation) -> Result<Donation> {
        self.writer
            .exec(move |conn| {
                if let Some(ref word) = new_donation.premium_word_id {
                    check_word_free(conn, word, None)?;
                }

                Ok(diesel::insert_into(donations::table)
                    .values(&new_donation)
                    .returning(donations::all_columns)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update(&self, donation_id: i32, changes: DonationChanges) -> Result<Donation> {
        self.writer
            .exec(move |conn| {
                let mut row: Donation = donations
                    .find(donation_id)
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| Error::NotFound(format!("donation {}", donation_id)))?;

                changes.apply_to(&mut row);
                if let Some(ref word) = row.premium_word_id {
                    if changes.premium_word_id.is_some() {
                        check_word_free(conn, word, Some(donation_id))?;
                    }
                }
                row.updated_at = Utc::now().naive_utc();

                diesel::update(donations.find(donation_id))
                    .set(&row)
                    .execute(conn)?;

                Ok(row)
            })
            .await
    }

    async fn delete(&self, donation_id: i32) -> Result<Donation> {
        self.writer
            .exec(move |conn| {
                let row: Donation = donations
                    .find(donation_id)
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| Error::NotFound(format!("donation {}", donation_id)))?;

                diesel::delete(donations.find(donation_id)).execute(conn)?;

                Ok(row)
            })
            .await
    }
}
