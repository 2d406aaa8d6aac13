//! Data source integration tests.
//!
//! Runs the filtered query against a SQLite file on disk and against a
//! one-shot local HTTP endpoint.

use bbviz::config::DataConfig;
use bbviz::data::{connect, BattedBallSource, FilterParams, PlayOutcome, SourceKind, SqliteDataSource};
use bbviz::error::VizError;
use std::path::Path;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

/// Creates a database file with a handful of batted balls.
async fn create_database(path: &Path) {
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

    let rows = [
        ("Judge, Aaron", "Cole, Gerrit", 28.4, 112.3, "HomeRun"),
        ("Judge, Aaron", "Burnes, Corbin", 5.5, 115.6, "Single"),
        ("Soto, Juan", "Webb, Logan", 12.1, 98.7, "Single"),
        ("Abreu, Jose", "Wheeler, Zack", 58.1, 76.5, "Out"),
    ];
    for (batter, pitcher, angle, speed, outcome) in rows {
        sqlx::query(
            "INSERT INTO batted_ball_data
             (BATTER, PITCHER, GAME_DATE, LAUNCH_ANGLE, EXIT_SPEED, EXIT_DIRECTION,
              HIT_DISTANCE, PLAY_OUTCOME, VIDEO_LINK)
             VALUES (?, ?, '2023-04-02', ?, ?, 0.0, 250.0, ?, 'https://video.example.com/plays/1')",
        )
        .bind(batter)
        .bind(pitcher)
        .bind(angle)
        .bind(speed)
        .bind(outcome)
        .execute(&pool)
        .await
        .unwrap();
    }

    pool.close().await;
}

#[tokio::test]
async fn test_sqlite_file_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bb.db");
    create_database(&path).await;

    let config = DataConfig {
        source: SourceKind::Sqlite,
        database: path.clone(),
        ..Default::default()
    };
    let source = assert_ok!(connect(&config).await);
    assert!(source.describe().contains("bb.db"));

    let all = assert_ok!(source.fetch(&FilterParams::default()).await);
    assert_eq!(all.len(), 4);

    let params = FilterParams {
        hitter: " JUDGE ".to_string(),
        ..Default::default()
    };
    let judge = assert_ok!(source.fetch(&params).await);
    assert_eq!(judge.len(), 2);
    assert!(judge.iter().all(|b| b.batter.as_deref() == Some("Judge, Aaron")));
}

#[tokio::test]
async fn test_sqlite_filters_combine() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bb.db");
    create_database(&path).await;
    let source = SqliteDataSource::open(&path).await.unwrap();

    let params = FilterParams {
        min_exit_speed: 90.0,
        play_outcome: PlayOutcome::Single,
        ..Default::default()
    };
    let records = source.fetch(&params).await.unwrap();
    let batters: Vec<_> = records.iter().filter_map(|b| b.batter.as_deref()).collect();
    assert_eq!(batters, vec!["Judge, Aaron", "Soto, Juan"]);

    source.close().await;
}

#[tokio::test]
async fn test_sqlite_missing_file_is_connection_error() {
    let dir = tempdir().unwrap();
    let config = DataConfig {
        source: SourceKind::Sqlite,
        database: dir.path().join("absent.db"),
        ..Default::default()
    };
    let Err(err) = connect(&config).await else {
        panic!("expected a connection error for a missing database file");
    };
    assert!(matches!(err, VizError::Connection(_)));
}

/// Serves exactly one HTTP response and returns the request line it saw.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (base, handle)
}

#[tokio::test]
async fn test_http_source_decodes_records() {
    let body = r#"[
        {"BATTER": "Judge, Aaron", "PITCHER": "Cole, Gerrit", "GAME_DATE": "2023-04-02",
         "LAUNCH_ANGLE": 28.4, "EXIT_SPEED": 112.3, "EXIT_DIRECTION": -12.0,
         "HIT_DISTANCE": 421.0, "PLAY_OUTCOME": "HomeRun",
         "VIDEO_LINK": "https://video.example.com/plays/1001"},
        {"BATTER": "Soto, Juan", "PITCHER": null, "GAME_DATE": null,
         "LAUNCH_ANGLE": null, "EXIT_SPEED": 98.7, "EXIT_DIRECTION": null,
         "HIT_DISTANCE": null, "PLAY_OUTCOME": null, "VIDEO_LINK": null}
    ]"#;
    let (base, server) = serve_once("200 OK", body).await;

    let config = DataConfig {
        source: SourceKind::Http,
        api_url: base,
        timeout_secs: 5,
        ..Default::default()
    };
    let source = connect(&config).await.unwrap();
    let params = FilterParams {
        hitter: "judge".to_string(),
        play_outcome: PlayOutcome::HomeRun,
        ..Default::default()
    };
    let records = source.fetch(&params).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].exit_speed, Some(112.3));
    assert_eq!(records[1].pitcher, None);

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /api/data?"));
    assert!(request_line.contains("hitter=judge"));
    assert!(request_line.contains("playOutcome=HomeRun"));
    assert!(request_line.contains("maxExitSpeed=120"));
}

#[tokio::test]
async fn test_http_error_body_is_query_error() {
    let (base, server) =
        serve_once("500 Internal Server Error", r#"{"error": "no such table: batted_ball_data"}"#)
            .await;

    let config = DataConfig {
        source: SourceKind::Http,
        api_url: base,
        timeout_secs: 5,
        ..Default::default()
    };
    let source = connect(&config).await.unwrap();
    let err = assert_err!(source.fetch(&FilterParams::default()).await);

    assert!(matches!(err, VizError::Query(_)));
    assert!(err.to_string().contains("no such table"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_mock_source_via_connect() {
    let config = DataConfig {
        source: SourceKind::Mock,
        ..Default::default()
    };
    let source = connect(&config).await.unwrap();
    let records = source.fetch(&FilterParams::default()).await.unwrap();
    // The sample row without metrics never satisfies a range
    assert_eq!(records.len(), 13);
}
