use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use newsdesk_core::domain::{
    ArticleChanges, Language, LocaleDraft, SiteSettings, Theme, UserRole,
};
use newsdesk_core::ports::{ArticleStore, SettingsStore, UserStore};
use newsdesk_core::query::ArticleQuery;

use crate::database::entity::{
    article, article_category, article_locale, category, category_locale, site_setting, user,
};
use crate::database::{PostgresArticleStore, PostgresSettingsStore, PostgresUserStore};

#[tokio::test]
async fn find_user_by_email_maps_to_domain() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            email: "admin@news.com".to_owned(),
            name: Some("系统管理员".to_owned()),
            role: "ADMIN".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let store = PostgresUserStore::new(db);

    let found = store.find_by_email("admin@news.com").await.unwrap().unwrap();
    assert_eq!(found.id, user_id);
    assert_eq!(found.role, UserRole::Admin);
    assert_eq!(found.display_name(), "系统管理员");
}

#[tokio::test]
async fn unknown_role_degrades_to_contributor() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: Uuid::new_v4(),
            email: "mystery@news.com".to_owned(),
            name: None,
            role: "SUPERUSER".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let store = PostgresUserStore::new(db);
    let found = store.find_by_email("mystery@news.com").await.unwrap().unwrap();
    assert_eq!(found.role, UserRole::Contributor);
}

#[tokio::test]
async fn slug_owner_returns_owning_article_id() {
    let article_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            vec![article::Model {
                id: article_id,
                slug: "hello-world".to_owned(),
                status: "DRAFT".to_owned(),
                featured: false,
                published_at: None,
                author_id: Uuid::new_v4(),
                created_at: now.into(),
                updated_at: now.into(),
            }],
            Vec::<article::Model>::new(),
        ])
        .into_connection();

    let store = PostgresArticleStore::new(db);

    assert_eq!(
        store.slug_owner("hello-world").await.unwrap(),
        Some(article_id)
    );
    assert_eq!(store.slug_owner("missing").await.unwrap(), None);
}

#[tokio::test]
async fn locale_update_replaces_the_whole_set() {
    let article_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let now = Utc::now();

    let stored = article::Model {
        id: article_id,
        slug: "hello-world".to_owned(),
        status: "DRAFT".to_owned(),
        featured: false,
        published_at: None,
        author_id,
        created_at: now.into(),
        updated_at: now.into(),
    };
    let new_locale = article_locale::Model {
        id: Uuid::new_v4(),
        article_id,
        language: "en".to_owned(),
        title: "Hello, world".to_owned(),
        content: "Body".to_owned(),
        excerpt: None,
        meta_description: None,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // find_by_id, then the UPDATE .. RETURNING row.
        .append_query_results(vec![vec![stored.clone()], vec![stored]])
        // The detail reload's locale fetch; the INSERT consumes an exec result.
        .append_query_results(vec![vec![new_locale]])
        .append_query_results(vec![Vec::<article_category::Model>::new()])
        .append_query_results(vec![Vec::<category::Model>::new()])
        .append_query_results(vec![Vec::<category_locale::Model>::new()])
        .append_query_results(vec![Vec::<user::Model>::new()])
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let store = PostgresArticleStore::new(db);

    let changes = ArticleChanges {
        locales: Some(vec![LocaleDraft {
            language: Language::En,
            title: "Hello, world".to_owned(),
            content: "Body".to_owned(),
            excerpt: None,
            meta_description: None,
        }]),
        ..Default::default()
    };
    let detail = store.update(article_id, changes).await.unwrap();

    // Only the supplied set survives.
    assert_eq!(detail.locales.len(), 1);
    assert_eq!(detail.locales[0].language, Language::En);
    assert_eq!(detail.locales[0].title, "Hello, world");

    // Existing rows are cleared before the replacement set goes in.
    let log = format!("{:?}", store.into_db().into_transaction_log());
    let cleared_at = log.find(r#"DELETE FROM "article_locales""#).unwrap();
    let inserted_at = log.find(r#"INSERT INTO "article_locales""#).unwrap();
    assert!(cleared_at < inserted_at);
}

#[tokio::test]
async fn listing_count_and_page_share_the_language_filter() {
    let count_row: BTreeMap<&str, Value> =
        BTreeMap::from([("num_items", Value::BigInt(Some(0)))]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row]])
        .append_query_results(vec![Vec::<article::Model>::new()])
        .append_query_results(vec![Vec::<article_locale::Model>::new()])
        .into_connection();

    let store = PostgresArticleStore::new(db);
    let page = store.list(&ArticleQuery::new(Language::En)).await.unwrap();
    assert_eq!(page.total_count, 0);
    assert!(page.articles.is_empty());

    // Articles without a row in the requested language are excluded from the
    // count the same way they are excluded from the page.
    let log = store.into_db().into_transaction_log();
    let count_stmt = format!("{:?}", log[0]);
    let page_stmt = format!("{:?}", log[1]);
    let presence = r#"IN (SELECT "article_id" FROM "article_locales""#;
    assert!(count_stmt.contains(presence));
    assert!(page_stmt.contains(presence));
    assert!(count_stmt.contains(r#"String(Some("en"))"#));
    assert!(page_stmt.contains(r#"String(Some("en"))"#));
}

#[tokio::test]
async fn settings_load_parses_stored_row() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![site_setting::Model {
            id: SiteSettings::SINGLETON_ID.to_owned(),
            site_name: "晨报".to_owned(),
            default_language: "en".to_owned(),
            theme: "dark".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let store = PostgresSettingsStore::new(db);
    let settings = store.load().await.unwrap().unwrap();
    assert_eq!(settings.site_name, "晨报");
    assert_eq!(settings.default_language, Language::En);
    assert_eq!(settings.theme, Theme::Dark);
}

#[tokio::test]
async fn settings_load_returns_none_before_first_write() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<site_setting::Model>::new()])
        .into_connection();

    let store = PostgresSettingsStore::new(db);
    assert!(store.load().await.unwrap().is_none());
}
