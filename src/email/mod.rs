use bigdecimal::BigDecimal;
use diesel::prelude::*;
use lettre::message::{header::ContentType, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use log::{error, info, warn};
use tokio::sync::mpsc;

use crate::config::MailConfig;
use crate::shared::schema::users;
use crate::shared::utils::{format_euro, DbPool};

/// Event families that can produce an email digest, each gated by its own
/// per-user preference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    NewDeal,
    DealWon,
    DealLost,
}

impl std::fmt::Display for EmailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewDeal => write!(f, "new_deal"),
            Self::DealWon => write!(f, "deal_won"),
            Self::DealLost => write!(f, "deal_lost"),
        }
    }
}

fn value_str(value: Option<&BigDecimal>) -> String {
    match value {
        Some(v) => format_euro(&v.to_string()),
        None => "Not specified".to_string(),
    }
}

/// A queued digest request. Built on the request path, delivered by the
/// background worker.
#[derive(Debug, Clone)]
pub struct EmailJob {
    pub kind: EmailKind,
    pub title: String,
    pub body: String,
    pub actor_id: i32,
}

impl EmailJob {
    pub fn new_deal(
        deal_title: &str,
        value: Option<&BigDecimal>,
        actor_name: &str,
        actor_id: i32,
    ) -> Self {
        Self {
            kind: EmailKind::NewDeal,
            title: "New Deal Created".to_string(),
            body: format!(
                "A new deal has been created in the CRM:\n\n\
                 Deal: {}\nValue: {}\nCreated by: {}",
                deal_title,
                value_str(value),
                actor_name
            ),
            actor_id,
        }
    }

    pub fn deal_won(
        deal_title: &str,
        value: Option<&BigDecimal>,
        actor_name: &str,
        actor_id: i32,
    ) -> Self {
        Self {
            kind: EmailKind::DealWon,
            title: "🎉 Deal Won!".to_string(),
            body: format!(
                "Great news! A deal has been marked as WON:\n\n\
                 Deal: {}\nValue: {}\nClosed by: {}",
                deal_title,
                value_str(value),
                actor_name
            ),
            actor_id,
        }
    }

    pub fn deal_lost(
        deal_title: &str,
        value: Option<&BigDecimal>,
        lost_reason: Option<&str>,
        actor_name: &str,
        actor_id: i32,
    ) -> Self {
        Self {
            kind: EmailKind::DealLost,
            title: "Deal Lost".to_string(),
            body: format!(
                "A deal has been marked as LOST:\n\n\
                 Deal: {}\nValue: {}\nReason: {}\nUpdated by: {}",
                deal_title,
                value_str(value),
                lost_reason.unwrap_or("Not specified"),
                actor_name
            ),
            actor_id,
        }
    }
}

#[derive(Debug, Clone, Queryable)]
pub struct MailRecipient {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub wants_it: bool,
}

/// Preference and address gate: the matching toggle must be on, an address
/// must exist, and the actor never mails themselves.
pub fn eligible(recipients: &[MailRecipient], actor_id: i32) -> Vec<&MailRecipient> {
    recipients
        .iter()
        .filter(|r| r.wants_it && r.email.is_some() && r.id != actor_id)
        .collect()
}

/// One digest body per event, listing who would have been notified.
pub fn digest(job: &EmailJob, recipients: &[&MailRecipient]) -> String {
    let names: Vec<String> = recipients
        .iter()
        .map(|r| {
            r.name
                .clone()
                .or_else(|| r.email.clone())
                .unwrap_or_else(|| format!("user {}", r.id))
        })
        .collect();
    format!(
        "{}\n\n---\nRecipients: {}\nNotification Type: {}",
        job.body,
        names.join(", "),
        job.kind
    )
}

/// Handle to the background mail worker. Cloneable; `enqueue` never blocks
/// and never fails the caller.
#[derive(Clone)]
pub struct Mailer {
    tx: Option<mpsc::UnboundedSender<EmailJob>>,
}

impl Mailer {
    /// No-op mailer for degraded mode and tests.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Spawns the worker task draining the queue. Recipient resolution needs
    /// the pool, so without one the mailer stays disabled.
    pub fn spawn(config: MailConfig, pool: Option<DbPool>) -> Self {
        let Some(pool) = pool else {
            info!("mail worker disabled: no database for recipient lookup");
            return Self::disabled();
        };
        let (tx, mut rx) = mpsc::unbounded_channel::<EmailJob>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                if let Err(e) = deliver(&config, &pool, &job) {
                    error!("failed to send {} email: {}", job.kind, e);
                }
            }
        });
        Self { tx: Some(tx) }
    }

    pub fn enqueue(&self, job: EmailJob) {
        match &self.tx {
            Some(tx) => {
                if tx.send(job).is_err() {
                    warn!("mail worker gone, dropping email job");
                }
            }
            None => info!("mail disabled, skipping email digest"),
        }
    }
}

fn load_recipients(
    conn: &mut PgConnection,
    kind: EmailKind,
) -> Result<Vec<MailRecipient>, diesel::result::Error> {
    match kind {
        EmailKind::NewDeal => users::table
            .select((
                users::id,
                users::name,
                users::email,
                users::email_notify_new_deal,
            ))
            .load(conn),
        EmailKind::DealWon => users::table
            .select((
                users::id,
                users::name,
                users::email,
                users::email_notify_deal_won,
            ))
            .load(conn),
        EmailKind::DealLost => users::table
            .select((
                users::id,
                users::name,
                users::email,
                users::email_notify_deal_lost,
            ))
            .load(conn),
    }
}

fn deliver(config: &MailConfig, pool: &DbPool, job: &EmailJob) -> anyhow::Result<()> {
    let mut conn = pool.get()?;
    let recipients = load_recipients(&mut conn, job.kind)?;
    let wanted = eligible(&recipients, job.actor_id);
    if wanted.is_empty() {
        info!("no eligible recipients for {} email, skipping", job.kind);
        return Ok(());
    }

    let message = Message::builder()
        .from(config.smtp_from.parse()?)
        .to(config.owner_email.parse()?)
        .subject(format!("[CRM] {}", job.title))
        .header(ContentType::TEXT_PLAIN)
        .body(digest(job, &wanted))?;

    let transport = match (&config.smtp_user, &config.smtp_pass) {
        (Some(user), Some(pass)) => SmtpTransport::relay(&config.smtp_host)?
            .credentials(Credentials::new(user.clone(), pass.clone()))
            .build(),
        _ => SmtpTransport::builder_dangerous(&config.smtp_host).build(),
    };
    transport.send(&message)?;
    info!("sent {} email digest to {}", job.kind, config.owner_email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(id: i32, email: Option<&str>, wants_it: bool) -> MailRecipient {
        MailRecipient {
            id,
            name: Some(format!("User {}", id)),
            email: email.map(str::to_string),
            wants_it,
        }
    }

    #[test]
    fn test_eligible_requires_preference_and_address() {
        let all = vec![
            recipient(1, Some("a@example.com"), true),
            recipient(2, None, true),
            recipient(3, Some("c@example.com"), false),
        ];
        let wanted = eligible(&all, 99);
        assert_eq!(wanted.len(), 1);
        assert_eq!(wanted[0].id, 1);
    }

    #[test]
    fn test_eligible_excludes_the_actor() {
        let all = vec![
            recipient(1, Some("a@example.com"), true),
            recipient(2, Some("b@example.com"), true),
        ];
        let wanted = eligible(&all, 1);
        assert_eq!(wanted.len(), 1);
        assert_eq!(wanted[0].id, 2);
    }

    #[test]
    fn test_digest_lists_recipient_names() {
        let all = vec![recipient(1, Some("a@example.com"), true)];
        let wanted = eligible(&all, 99);
        let job = EmailJob::deal_won("Enterprise License", None, "Dana", 99);
        let body = digest(&job, &wanted);
        assert!(body.contains("Recipients: User 1"));
        assert!(body.contains("Notification Type: deal_won"));
        assert!(body.contains("Value: Not specified"));
    }

    #[test]
    fn test_deal_value_is_grouped_like_the_exports() {
        let value: BigDecimal = "25000".parse().unwrap();
        let job = EmailJob::new_deal("Enterprise License", Some(&value), "Dana", 1);
        assert!(job.body.contains("Value: €25,000"));
    }

    #[test]
    fn test_lost_digest_carries_the_reason() {
        let job = EmailJob::deal_lost("D", None, Some("budget cut"), "Dana", 1);
        assert!(job.body.contains("Reason: budget cut"));
        let no_reason = EmailJob::deal_lost("D", None, None, "Dana", 1);
        assert!(no_reason.body.contains("Reason: Not specified"));
    }

    #[test]
    fn test_disabled_mailer_swallows_jobs() {
        Mailer::disabled().enqueue(EmailJob::new_deal("D", None, "Dana", 1));
    }
}
