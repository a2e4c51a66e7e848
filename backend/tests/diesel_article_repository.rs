//! Integration tests for `DieselArticleRepository` against embedded PostgreSQL.
//!
//! These mirror the in-memory listing cases so both adapters are held to the
//! same window, ordering, and keyword semantics.

use market_board::domain::ports::{ArticleRepository, PersistenceError};
use market_board::domain::{
    Article, ArticleDraft, ArticleId, ArticleListQuery, ArticleOrder, ArticlePatch, Keyword,
};
use market_board::outbound::persistence::DieselArticleRepository;
use pagination::PageWindow;
use rstest::{fixture, rstest};

mod support;

use support::embedded_postgres::{TestDatabase, test_database};

#[fixture]
fn database() -> Option<TestDatabase> {
    test_database()
}

fn seed(db: &TestDatabase, repo: &DieselArticleRepository, titles: &[&str]) -> Vec<Article> {
    db.runtime.block_on(async {
        let mut created = Vec::with_capacity(titles.len());
        for (n, title) in titles.iter().enumerate() {
            let draft = ArticleDraft::new(*title, format!("post {}", n + 1)).expect("valid draft");
            created.push(repo.create(&draft).await.expect("insert article"));
        }
        created
    })
}

fn listed_ids(
    db: &TestDatabase,
    repo: &DieselArticleRepository,
    query: &ArticleListQuery,
) -> Vec<i64> {
    db.runtime
        .block_on(repo.list(query))
        .expect("list articles")
        .iter()
        .map(|article| article.id.get())
        .collect()
}

#[rstest]
fn article_round_trip(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: article_round_trip skipped");
        return;
    };
    let repo = DieselArticleRepository::new(db.pool.clone());
    let created = seed(&db, &repo, &["Free sofa"]).remove(0);

    db.runtime.block_on(async {
        let fetched = repo.find_by_id(created.id).await.expect("lookup");
        assert_eq!(fetched.as_ref(), Some(&created));

        let patch = ArticlePatch::new(Some("Free sofa (taken)".to_owned()), None).expect("patch");
        let updated = repo
            .update(created.id, &patch)
            .await
            .expect("update")
            .expect("article exists");
        assert_eq!(updated.title, "Free sofa (taken)");
        assert_eq!(updated.content, created.content);
        assert_eq!(updated.created_at, created.created_at);

        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(!repo.delete(created.id).await.expect("second delete"));
        assert_eq!(repo.find_by_id(created.id).await.expect("lookup"), None);
        assert_eq!(
            repo.update(ArticleId::new(404), &patch).await.expect("update"),
            None
        );
    });
}

#[rstest]
#[case(ArticleOrder::Oldest, PageWindow::from_page(2, 5), vec![6, 7, 8, 9, 10])]
#[case(ArticleOrder::Recent, PageWindow::from_page(2, 5), vec![7, 6, 5, 4, 3])]
#[case(ArticleOrder::Oldest, PageWindow::from_offset(10, 5), vec![11, 12])]
#[case(ArticleOrder::Recent, PageWindow::from_page(9, 10), vec![])]
fn listing_windows_match_the_memory_store(
    database: Option<TestDatabase>,
    #[case] order: ArticleOrder,
    #[case] window: PageWindow,
    #[case] expected: Vec<i64>,
) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: listing_windows_match_the_memory_store skipped");
        return;
    };
    let repo = DieselArticleRepository::new(db.pool.clone());
    let titles: Vec<String> = (1..=12).map(|n| format!("notice {n}")).collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    seed(&db, &repo, &titles);

    let query = ArticleListQuery {
        keyword: Keyword::default(),
        order,
        window,
    };
    assert_eq!(listed_ids(&db, &repo, &query), expected);
}

#[rstest]
#[case("0%", vec![1])]
#[case("a_b", vec![3])]
#[case("\\", vec![5])]
#[case("off", vec![2, 1])]
#[case("Off", vec![])]
#[case("post 4", vec![4])]
fn keyword_wildcards_match_literally(
    database: Option<TestDatabase>,
    #[case] keyword: &str,
    #[case] expected: Vec<i64>,
) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: keyword_wildcards_match_literally skipped");
        return;
    };
    let repo = DieselArticleRepository::new(db.pool.clone());
    seed(&db, &repo, &["50% off", "500 off", "a_b", "axb", "C:\\temp"]);

    let query = ArticleListQuery {
        keyword: Keyword::new(Some(keyword.to_owned())),
        ..ArticleListQuery::default()
    };
    assert_eq!(listed_ids(&db, &repo, &query), expected);
}

#[rstest]
fn oversized_offset_is_rejected_before_querying(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: oversized_offset_is_rejected_before_querying skipped");
        return;
    };
    let repo = DieselArticleRepository::new(db.pool.clone());

    let query = ArticleListQuery {
        window: PageWindow::from_offset(u64::MAX, 10),
        ..ArticleListQuery::default()
    };
    let result = db.runtime.block_on(repo.list(&query));
    assert_eq!(
        result,
        Err(PersistenceError::invalid_argument(
            "offset exceeds the supported range"
        ))
    );
}
