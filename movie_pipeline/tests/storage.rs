use chrono::NaiveDate;
use movie_pipeline::errors::LoadError;
use movie_pipeline::io::frame::read_str;
use movie_pipeline::io::{DataRepository, Table};
use movie_pipeline::models::Movie;
use tempfile::TempDir;

fn toy_story() -> Movie {
    Movie {
        id: 862,
        title: "Toy Story".into(),
        original_title: Some("Toy Story".into()),
        original_language: Some("en".into()),
        overview: None,
        tagline: None,
        imdb_id: Some("tt0114709".into()),
        status: "Released".into(),
        budget: 30_000_000.0,
        revenue: 373_554_033.0,
        release_date: NaiveDate::from_ymd_opt(1995, 10, 30),
        release_year: Some(1995),
        runtime: Some(81.0),
        popularity: 21.946943,
        vote_average: 7.7,
        vote_count: 5415,
        genre_names: vec!["Animation".into(), "Comedy".into(), "Family".into()],
        production_companies: vec!["Pixar Animation Studios".into()],
        production_countries: vec![],
        spoken_languages: vec!["English".into()],
        profit: 343_554_033.0,
        has_budget: true,
        has_revenue: true,
        roi: Some(1145.18011),
    }
}

fn unreleased() -> Movie {
    Movie {
        id: 2,
        title: "Untitled".into(),
        original_title: None,
        original_language: None,
        overview: Some("Plot, with \"quotes\" and commas".into()),
        tagline: None,
        imdb_id: None,
        status: "Rumored".into(),
        budget: 0.0,
        revenue: 0.0,
        release_date: None,
        release_year: None,
        runtime: None,
        popularity: 0.0,
        vote_average: 0.0,
        vote_count: 0,
        genre_names: vec![],
        production_companies: vec![],
        production_countries: vec![],
        spoken_languages: vec![],
        profit: 0.0,
        has_budget: false,
        has_revenue: false,
        roi: None,
    }
}

#[test]
fn parquet_round_trip_preserves_values_and_column_order() {
    let dir = TempDir::new().unwrap();
    let repo = DataRepository::new(dir.path().join("processed"));
    let movies = vec![toy_story(), unreleased()];

    let shape = repo.save_table(&movies).unwrap();
    assert_eq!(shape.rows, 2);
    assert_eq!(shape.columns, 24);
    assert!(repo.exists(Movie::NAME));

    let back: Vec<Movie> = repo.read_table().unwrap();
    assert_eq!(back, movies);

    let df = repo.read_parquet("movies.parquet").unwrap();
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(&names[..3], &["id", "title", "original_title"]);
    assert_eq!(names.last(), Some(&"roi"));
}

#[test]
fn saving_replaces_the_previous_table() {
    let dir = TempDir::new().unwrap();
    let repo = DataRepository::new(dir.path());

    repo.save_table(&[toy_story(), unreleased()]).unwrap();
    repo.save_table(&[unreleased()]).unwrap();

    let back: Vec<Movie> = repo.read_table().unwrap();
    assert_eq!(back, vec![unreleased()]);
}

#[test]
fn csv_export_flattens_lists() {
    let dir = TempDir::new().unwrap();
    let repo = DataRepository::new(dir.path());

    let df = Movie::to_frame(&[toy_story(), unreleased()]).unwrap();
    repo.save_csv(&df, "movies").unwrap();

    let csv = repo.read_csv("movies").unwrap();
    assert_eq!(csv.height(), 2);
    assert_eq!(
        read_str(&csv, "genre_names").unwrap()[0].as_deref(),
        Some("Animation|Comedy|Family")
    );
    assert_eq!(
        read_str(&csv, "overview").unwrap()[1].as_deref(),
        Some("Plot, with \"quotes\" and commas")
    );
}

#[test]
fn missing_table_is_reported_with_its_path() {
    let dir = TempDir::new().unwrap();
    let repo = DataRepository::new(dir.path());

    let err = repo.read_table::<Movie>().unwrap_err();
    match err {
        LoadError::TableNotFound { path, .. } => {
            assert_eq!(path, dir.path().join("movies.parquet"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn corrupt_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("movies.parquet"), b"not parquet").unwrap();
    let repo = DataRepository::new(dir.path());

    assert!(matches!(
        repo.read_parquet("movies"),
        Err(LoadError::ReadTable { .. })
    ));
}

#[test]
fn listing_filters_by_extension() {
    let dir = TempDir::new().unwrap();
    let repo = DataRepository::new(dir.path());
    repo.save_table(&[unreleased()]).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let files = repo.list_files("parquet").unwrap();
    assert_eq!(files, vec![dir.path().join("movies.parquet")]);
    assert!(DataRepository::new(dir.path().join("absent"))
        .list_files("parquet")
        .unwrap()
        .is_empty());
}
