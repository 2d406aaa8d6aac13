//! Roster export and loading tests.

use bbviz::config::{Config, RosterConfig};
use bbviz::data::{MockDataSource, SourceKind, SqliteDataSource};
use bbviz::roster::{self, JsonNameSource, PlayerRole, Roster};
use tempfile::tempdir;

#[tokio::test]
async fn test_export_then_load_round_trip() {
    let dir = tempdir().unwrap();
    let written = roster::export(&MockDataSource::new(), dir.path()).await.unwrap();
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("hitters.json"));
    assert!(written[1].ends_with("pitchers.json"));

    let hitters: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(hitters.first().map(String::as_str), Some("abreu, jose"));
    assert!(hitters.windows(2).all(|w| w[0] < w[1]));

    let source = JsonNameSource::new(Some(written[0].clone()), Some(written[1].clone()));
    let roster = Roster::load(&source).await;
    assert_eq!(
        roster.hitters.suggest("a"),
        vec![
            "abreu, jose",
            "acuna jr., ronald",
            "adell, jo",
            "alonso, pete",
            "altuve, jose",
        ]
    );
    assert_eq!(roster.index(PlayerRole::Pitcher).suggest("c"), vec![
        "castillo, luis",
        "cease, dylan",
        "cole, gerrit",
    ]);
}

#[tokio::test]
async fn test_configured_files_win_over_data_source() {
    let dir = tempdir().unwrap();
    let hitters = dir.path().join("h.json");
    std::fs::write(&hitters, r#"["Zimmer, Bradley"]"#).unwrap();

    let mut config = Config::default();
    config.data.source = SourceKind::Mock;
    config.roster = RosterConfig {
        hitters: Some(hitters),
        pitchers: None,
    };

    let roster = Roster::load(roster::name_source(&config).await.as_ref()).await;
    assert_eq!(roster.hitters.suggest("z"), vec!["zimmer, bradley"]);
    // No pitcher file configured, so pitcher suggestions are simply empty
    assert!(roster.pitchers.is_empty());
}

#[tokio::test]
async fn test_mock_source_lists_its_names() {
    let mut config = Config::default();
    config.data.source = SourceKind::Mock;

    let roster = Roster::load(roster::name_source(&config).await.as_ref()).await;
    assert_eq!(roster.hitters.suggest("judge"), vec!["judge, aaron"]);
    assert_eq!(roster.pitchers.suggest("w").len(), 2);
}

#[tokio::test]
async fn test_sqlite_names_are_distinct() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("names.db");
    let url = format!("sqlite:{}?mode=rwc", path.display());
    let pool = sqlx::SqlitePool::connect(&url).await.unwrap();
    sqlx::query(
        "CREATE TABLE batted_ball_data (
            BATTER TEXT, PITCHER TEXT, GAME_DATE TEXT, LAUNCH_ANGLE REAL,
            EXIT_SPEED REAL, EXIT_DIRECTION REAL, HIT_DISTANCE REAL,
            PLAY_OUTCOME TEXT, VIDEO_LINK TEXT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO batted_ball_data (BATTER, PITCHER) VALUES
            ('Judge, Aaron', 'Cole, Gerrit'),
            ('Judge, Aaron', 'Webb, Logan'),
            (NULL, 'Cole, Gerrit')",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let source = SqliteDataSource::open(&path).await.unwrap();
    let written = roster::export(&source, &dir.path().join("public")).await.unwrap();

    let hitters = std::fs::read_to_string(&written[0]).unwrap();
    let pitchers = std::fs::read_to_string(&written[1]).unwrap();
    assert_eq!(hitters, r#"["judge, aaron"]"#);
    assert_eq!(pitchers, r#"["cole, gerrit","webb, logan"]"#);
}
