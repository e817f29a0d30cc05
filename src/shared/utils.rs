use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::PgConnection;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create_conn(database_url: &str) -> Result<DbPool, diesel::r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().build(manager)
}

fn group_digits(int_part: &str) -> String {
    let len = int_part.chars().count();
    let mut out = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `"1500.5"` → `"€1,500.5"`. Every surface that prints a money amount
/// goes through here so the grouping stays consistent.
pub fn format_euro(amount: &str) -> String {
    let n: f64 = amount.parse().unwrap_or(0.0);
    let text = n.abs().to_string();
    let (int_part, frac) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };
    let sign = if n < 0.0 { "-" } else { "" };
    match frac {
        Some(f) => format!("€{}{}.{}", sign, group_digits(&int_part), f),
        None => format!("€{}{}", sign, group_digits(&int_part)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_euro_groups_thousands() {
        assert_eq!(format_euro("1500.5"), "€1,500.5");
        assert_eq!(format_euro("25000"), "€25,000");
        assert_eq!(format_euro("0"), "€0");
        assert_eq!(format_euro("not a number"), "€0");
    }

    #[test]
    fn test_format_euro_keeps_the_sign() {
        assert_eq!(format_euro("-1200"), "€-1,200");
    }
}
