//! Append-only message log

use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};

use super::Database;
use crate::models::{Message, MessageKind};

#[derive(FromRow)]
struct MessageRow {
    sender: String,
    recipient: String,
    text: String,
    kind: String,
    time: String,
}

impl Database {
    /// Append a single message
    pub async fn append_message(&self, message: &Message) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_message(&mut *conn, message).await
    }

    /// All messages, in insertion order
    pub async fn list_messages(&self) -> Result<Vec<Message>, sqlx::Error> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT sender, recipient, text, kind, time FROM messages ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_message).collect()
    }

    pub(super) async fn insert_message(
        conn: &mut SqliteConnection,
        message: &Message,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO messages (sender, recipient, text, kind, time) VALUES (?, ?, ?, ?, ?)")
            .bind(&message.from)
            .bind(&message.to)
            .bind(&message.text)
            .bind(message.kind.as_str())
            .bind(&message.time)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Append several messages with one multi-row insert
    pub(super) async fn insert_messages(
        conn: &mut SqliteConnection,
        messages: &[Message],
    ) -> Result<(), sqlx::Error> {
        if messages.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO messages (sender, recipient, text, kind, time) ");
        builder.push_values(messages, |mut b, message| {
            b.push_bind(&message.from)
                .push_bind(&message.to)
                .push_bind(&message.text)
                .push_bind(message.kind.as_str())
                .push_bind(&message.time);
        });
        builder.build().execute(conn).await?;

        Ok(())
    }

    fn row_to_message(row: MessageRow) -> Result<Message, sqlx::Error> {
        let kind = row
            .kind
            .parse::<MessageKind>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Message {
            from: row.sender,
            to: row.recipient,
            text: row.text,
            kind,
            time: row.time,
        })
    }
}
