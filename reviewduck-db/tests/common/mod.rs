use reviewduck_db::{Database, ReviewFormService, ReviewService};
use tempfile::TempDir;

pub struct TestContext {
    pub db: Database,
    pub forms: ReviewFormService,
    pub reviews: ReviewService,
    _temp: TempDir,
}

pub async fn setup() -> TestContext {
    let temp = TempDir::new().unwrap();
    let db = Database::open(temp.path().join("reviewduck.db")).await.unwrap();
    TestContext {
        forms: ReviewFormService::new(db.clone()),
        reviews: ReviewService::new(db.clone()),
        db,
        _temp: temp,
    }
}
