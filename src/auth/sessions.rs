// src/auth/sessions.rs
use crate::auth::context::{Identity, Role};
use crate::auth::token::{generate_session_token, hash_token};
use crate::errors::ServerError;
use crate::listing::notice::{Notice, NoticeLevel};
use rusqlite::{params, Connection, OptionalExtension};

/// Store a new session and return the raw cookie token.
pub fn create_session(
    conn: &Connection,
    email: &str,
    role: Role,
    api_token: &str,
    now: i64,
    ttl_secs: i64,
) -> Result<(String, i64), ServerError> {
    let raw_token = generate_session_token();
    let hash = hash_token(&raw_token);
    let expires_at = now + ttl_secs;

    conn.execute(
        r#"
        insert into sessions (token_hash, api_token, email, role, created_at, expires_at)
        values (?, ?, ?, ?, ?, ?)
        "#,
        params![hash.as_slice(), api_token, email, role.as_str(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok((raw_token, conn.last_insert_rowid()))
}

pub fn load_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<Identity>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select id, email, role, api_token
        from sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| {
            let role: String = row.get(2)?;
            Ok(Identity {
                session_id: row.get(0)?,
                email: row.get(1)?,
                role: Role::from_wire(&role),
                api_token: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, session_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where id = ? and revoked_at is null",
        params![now, session_id],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

pub fn purge_expired(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from sessions where expires_at <= ? or revoked_at is not null",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))
}

/// Park a notice on the session until the next page render.
pub fn set_flash(conn: &Connection, session_id: i64, notice: &Notice) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set flash_level = ?, flash_message = ? where id = ?",
        params![notice.level.as_str(), notice.message, session_id],
    )
    .map_err(|e| ServerError::DbError(format!("set flash failed: {e}")))?;
    Ok(())
}

/// Read and clear the parked notice.
pub fn take_flash(conn: &mut Connection, session_id: i64) -> Result<Option<Notice>, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin failed: {e}")))?;

    let row: Option<(Option<String>, Option<String>)> = tx
        .query_row(
            "select flash_level, flash_message from sessions where id = ?",
            params![session_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("read flash failed: {e}")))?;

    tx.execute(
        "update sessions set flash_level = null, flash_message = null where id = ?",
        params![session_id],
    )
    .map_err(|e| ServerError::DbError(format!("clear flash failed: {e}")))?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

    Ok(match row {
        Some((Some(level), Some(message))) => {
            let level = level.parse().unwrap_or(NoticeLevel::Info);
            Some(Notice { level, message })
        }
        _ => None,
    })
}
