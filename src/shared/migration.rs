use diesel::connection::SimpleConnection;
use diesel::PgConnection;

pub fn bootstrap_sql() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        open_id VARCHAR(64) NOT NULL UNIQUE,
        name TEXT,
        email VARCHAR(320),
        login_method VARCHAR(64),
        role TEXT NOT NULL DEFAULT 'user',
        avatar TEXT,
        phone VARCHAR(32),
        department VARCHAR(128),
        email_notify_new_deal BOOLEAN NOT NULL DEFAULT TRUE,
        email_notify_deal_won BOOLEAN NOT NULL DEFAULT TRUE,
        email_notify_deal_lost BOOLEAN NOT NULL DEFAULT TRUE,
        email_notify_overdue BOOLEAN NOT NULL DEFAULT TRUE,
        email_notify_activity_due BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        last_signed_in TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS companies (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        industry VARCHAR(128),
        website VARCHAR(512),
        phone VARCHAR(32),
        email VARCHAR(320),
        address TEXT,
        city VARCHAR(128),
        country VARCHAR(128),
        employee_count INTEGER,
        annual_revenue NUMERIC(15, 2),
        description TEXT,
        logo TEXT,
        owner_id INTEGER REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS contacts (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(128) NOT NULL,
        last_name VARCHAR(128) NOT NULL,
        email VARCHAR(320),
        phone VARCHAR(32),
        mobile VARCHAR(32),
        job_title VARCHAR(128),
        department VARCHAR(128),
        company_id INTEGER REFERENCES companies(id),
        address TEXT,
        city VARCHAR(128),
        country VARCHAR(128),
        linked_in VARCHAR(512),
        twitter VARCHAR(256),
        notes TEXT,
        status TEXT NOT NULL DEFAULT 'lead',
        source VARCHAR(128),
        avatar TEXT,
        owner_id INTEGER REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_contacts_status ON contacts(status);
    CREATE INDEX IF NOT EXISTS idx_contacts_owner ON contacts(owner_id);

    CREATE TABLE IF NOT EXISTS deals (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        value NUMERIC(15, 2),
        currency VARCHAR(3) NOT NULL DEFAULT 'EUR',
        stage TEXT NOT NULL DEFAULT 'lead',
        probability INTEGER DEFAULT 0,
        expected_close_date TIMESTAMPTZ,
        actual_close_date TIMESTAMPTZ,
        contact_id INTEGER REFERENCES contacts(id),
        company_id INTEGER REFERENCES companies(id),
        owner_id INTEGER REFERENCES users(id),
        description TEXT,
        lost_reason TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_deals_stage ON deals(stage);
    CREATE INDEX IF NOT EXISTS idx_deals_owner ON deals(owner_id);

    CREATE TABLE IF NOT EXISTS activities (
        id SERIAL PRIMARY KEY,
        type TEXT NOT NULL,
        subject VARCHAR(255) NOT NULL,
        description TEXT,
        due_date TIMESTAMPTZ,
        completed_at TIMESTAMPTZ,
        is_completed BOOLEAN NOT NULL DEFAULT FALSE,
        contact_id INTEGER REFERENCES contacts(id),
        company_id INTEGER REFERENCES companies(id),
        deal_id INTEGER REFERENCES deals(id),
        owner_id INTEGER REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_activities_due ON activities(due_date);
    CREATE INDEX IF NOT EXISTS idx_activities_owner ON activities(owner_id);

    CREATE TABLE IF NOT EXISTS tags (
        id SERIAL PRIMARY KEY,
        name VARCHAR(64) NOT NULL UNIQUE,
        color VARCHAR(7) NOT NULL DEFAULT '#3B82F6',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS contact_tags (
        id SERIAL PRIMARY KEY,
        contact_id INTEGER NOT NULL REFERENCES contacts(id),
        tag_id INTEGER NOT NULL REFERENCES tags(id)
    );

    CREATE TABLE IF NOT EXISTS notifications (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        type TEXT NOT NULL,
        title VARCHAR(255) NOT NULL,
        message TEXT,
        link VARCHAR(512),
        is_read BOOLEAN NOT NULL DEFAULT FALSE,
        related_deal_id INTEGER REFERENCES deals(id),
        related_activity_id INTEGER REFERENCES activities(id),
        related_contact_id INTEGER REFERENCES contacts(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id, is_read);
    "#
}

pub fn run_migrations(conn: &mut PgConnection) -> Result<(), diesel::result::Error> {
    conn.batch_execute(bootstrap_sql())
}
