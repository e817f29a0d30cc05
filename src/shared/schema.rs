diesel::table! {
    users (id) {
        id -> Int4,
        open_id -> Varchar,
        name -> Nullable<Text>,
        email -> Nullable<Varchar>,
        login_method -> Nullable<Varchar>,
        role -> Text,
        avatar -> Nullable<Text>,
        phone -> Nullable<Varchar>,
        department -> Nullable<Varchar>,
        email_notify_new_deal -> Bool,
        email_notify_deal_won -> Bool,
        email_notify_deal_lost -> Bool,
        email_notify_overdue -> Bool,
        email_notify_activity_due -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        last_signed_in -> Timestamptz,
    }
}

diesel::table! {
    companies (id) {
        id -> Int4,
        name -> Varchar,
        industry -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        address -> Nullable<Text>,
        city -> Nullable<Varchar>,
        country -> Nullable<Varchar>,
        employee_count -> Nullable<Int4>,
        annual_revenue -> Nullable<Numeric>,
        description -> Nullable<Text>,
        logo -> Nullable<Text>,
        owner_id -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    contacts (id) {
        id -> Int4,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        mobile -> Nullable<Varchar>,
        job_title -> Nullable<Varchar>,
        department -> Nullable<Varchar>,
        company_id -> Nullable<Int4>,
        address -> Nullable<Text>,
        city -> Nullable<Varchar>,
        country -> Nullable<Varchar>,
        linked_in -> Nullable<Varchar>,
        twitter -> Nullable<Varchar>,
        notes -> Nullable<Text>,
        status -> Text,
        source -> Nullable<Varchar>,
        avatar -> Nullable<Text>,
        owner_id -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    deals (id) {
        id -> Int4,
        title -> Varchar,
        value -> Nullable<Numeric>,
        currency -> Varchar,
        stage -> Text,
        probability -> Nullable<Int4>,
        expected_close_date -> Nullable<Timestamptz>,
        actual_close_date -> Nullable<Timestamptz>,
        contact_id -> Nullable<Int4>,
        company_id -> Nullable<Int4>,
        owner_id -> Nullable<Int4>,
        description -> Nullable<Text>,
        lost_reason -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    activities (id) {
        id -> Int4,
        #[sql_name = "type"]
        kind -> Text,
        subject -> Varchar,
        description -> Nullable<Text>,
        due_date -> Nullable<Timestamptz>,
        completed_at -> Nullable<Timestamptz>,
        is_completed -> Bool,
        contact_id -> Nullable<Int4>,
        company_id -> Nullable<Int4>,
        deal_id -> Nullable<Int4>,
        owner_id -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    tags (id) {
        id -> Int4,
        name -> Varchar,
        color -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    contact_tags (id) {
        id -> Int4,
        contact_id -> Int4,
        tag_id -> Int4,
    }
}

diesel::table! {
    notifications (id) {
        id -> Int4,
        user_id -> Int4,
        #[sql_name = "type"]
        kind -> Text,
        title -> Varchar,
        message -> Nullable<Text>,
        link -> Nullable<Varchar>,
        is_read -> Bool,
        related_deal_id -> Nullable<Int4>,
        related_activity_id -> Nullable<Int4>,
        related_contact_id -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}
