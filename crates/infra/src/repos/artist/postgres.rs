use super::IArtistRepo;
use inkgest_domain::{Artist, ID};
use serde_json::Value;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresArtistRepo {
    pool: PgPool,
}

impl PostgresArtistRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArtistRaw {
    artist_uid: Uuid,
    store_uid: Uuid,
    name: String,
    email: Option<String>,
    commission_rate: i64,
    specialties: Value,
}

impl From<ArtistRaw> for Artist {
    fn from(e: ArtistRaw) -> Self {
        Self {
            id: e.artist_uid.into(),
            store_id: e.store_uid.into(),
            name: e.name,
            email: e.email,
            commission_rate: e.commission_rate,
            specialties: serde_json::from_value(e.specialties).unwrap(),
        }
    }
}

#[async_trait::async_trait]
impl IArtistRepo for PostgresArtistRepo {
    async fn insert(&self, artist: &Artist) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO artists
            (artist_uid, store_uid, name, email, commission_rate, specialties)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(artist.id.inner_ref())
        .bind(artist.store_id.inner_ref())
        .bind(&artist.name)
        .bind(&artist.email)
        .bind(artist.commission_rate)
        .bind(Json(&artist.specialties))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert artist: {:?}. DB returned error: {:?}",
                artist, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, artist: &Artist) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE artists
            SET name = $3,
            email = $4,
            commission_rate = $5,
            specialties = $6
            WHERE artist_uid = $1 AND store_uid = $2
            "#,
        )
        .bind(artist.id.inner_ref())
        .bind(artist.store_id.inner_ref())
        .bind(&artist.name)
        .bind(&artist.email)
        .bind(artist.commission_rate)
        .bind(Json(&artist.specialties))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save artist: {:?}. DB returned error: {:?}",
                artist, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, artist_id: &ID) -> Option<Artist> {
        let res: Option<ArtistRaw> = sqlx::query_as(
            r#"
            SELECT * FROM artists
            WHERE artist_uid = $1
            "#,
        )
        .bind(artist_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);
        res.map(|artist| artist.into())
    }
}
