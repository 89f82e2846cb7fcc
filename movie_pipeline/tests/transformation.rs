mod common;
use common::{Fixture, movie};

use movie_pipeline::errors::TransformError;
use movie_pipeline::io::DataRepository;
use movie_pipeline::models::{Credits, Movie, Rating};
use movie_pipeline::{Pipeline, PipelineError};

fn with_minimal_side_tables(fixture: &Fixture) {
    fixture.write_credits(&[("1", &["Lead"], Some("Director"))]);
    fixture.write_keywords(&[("1", &["word"])]);
}

#[test]
fn malformed_catalog_rows_are_dropped() {
    let fixture = Fixture::new();
    fixture.write_movies(&[
        movie("1", "1000", "3000", "1999-01-01"),
        movie("1997-08-20", "10", "10", "1999-01-01"),
        movie("3", "not a number", "", "someday"),
    ]);
    with_minimal_side_tables(&fixture);
    let settings = fixture.settings();
    let silver = DataRepository::new(settings.silver_dir());

    let report = Pipeline::new(settings).run_transformation().unwrap();
    assert_eq!(report.get("movies").map(|s| s.rows), Some(2));

    let movies: Vec<Movie> = silver.read_table().unwrap();
    let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let sparse = &movies[1];
    assert_eq!(sparse.budget, 0.0);
    assert_eq!(sparse.revenue, 0.0);
    assert!(!sparse.has_budget);
    assert_eq!(sparse.release_date, None);
    assert_eq!(sparse.release_year, None);
    assert_eq!(sparse.roi, None);
}

#[test]
fn ratings_are_clamped_into_range() {
    let fixture = Fixture::new();
    fixture.write_movies(&[movie("1", "0", "0", "2001-05-05")]);
    with_minimal_side_tables(&fixture);
    fixture.write_ratings(&[
        ["1", "1", "10", "1260759144"],
        ["1", "1", "0", "1260759145"],
        ["2", "1", "3.5", "1260759146"],
        ["x", "1", "3.5", "1260759147"],
    ]);
    let settings = fixture.settings();
    let silver = DataRepository::new(settings.silver_dir());

    Pipeline::new(settings).run_transformation().unwrap();
    let ratings: Vec<Rating> = silver.read_table().unwrap();
    let scores: Vec<f64> = ratings.iter().map(|r| r.rating).collect();
    assert_eq!(scores, vec![5.0, 0.5, 3.5]);
}

#[test]
fn missing_ratings_file_is_not_an_error() {
    let fixture = Fixture::new();
    fixture.write_movies(&[movie("1", "0", "0", "2001-05-05")]);
    with_minimal_side_tables(&fixture);
    let settings = fixture.settings();
    let silver = DataRepository::new(settings.silver_dir());

    let report = Pipeline::new(settings).run_transformation().unwrap();
    assert!(report.get("ratings").is_none());
    assert!(!silver.exists("ratings"));
    assert!(silver.exists("credits"));
}

#[test]
fn cast_is_capped_and_director_extracted() {
    let fixture = Fixture::new();
    fixture.write_movies(&[movie("1", "0", "0", "2001-05-05")]);
    fixture.write_credits(&[(
        "1",
        &["One", "Two", "Three", "Four", "Five", "Six", "Seven"],
        Some("Jane Doe"),
    )]);
    fixture.write_keywords(&[("1", &[])]);
    let mut settings = fixture.settings();
    settings.cast_limit = 3;
    let silver = DataRepository::new(settings.silver_dir());

    Pipeline::new(settings).run_transformation().unwrap();
    let credits: Vec<Credits> = silver.read_table().unwrap();
    assert_eq!(credits[0].cast_names, vec!["One", "Two", "Three"]);
    assert_eq!(credits[0].director.as_deref(), Some("Jane Doe"));
}

#[test]
fn missing_required_column_fails_the_stage() {
    let fixture = Fixture::new();
    fixture.write_raw(
        "movies_metadata.csv",
        "id,title,status,revenue,release_date,genres\n1,Toy Story,Released,10,1995-10-30,[]\n",
    );
    with_minimal_side_tables(&fixture);

    let err = Pipeline::new(fixture.settings())
        .run_transformation()
        .unwrap_err();
    match err {
        PipelineError::Transformation(TransformError::MissingColumn { column, .. }) => {
            assert_eq!(column, "budget");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn absent_raw_table_is_a_read_error() {
    let fixture = Fixture::new();
    fixture.write_movies(&[movie("1", "0", "0", "2001-05-05")]);

    let err = Pipeline::new(fixture.settings())
        .run_transformation()
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Transformation(TransformError::ReadSource { .. })
    ));
}

#[test]
fn invalid_utf8_in_one_cell_keeps_the_file_readable() {
    let fixture = Fixture::new();
    fixture.write_movies(&[
        movie("1", "10", "20", "2001-05-05"),
        movie("2", "10", "20", "2001-05-05"),
    ]);
    with_minimal_side_tables(&fixture);

    let path = fixture.bronze_dir().join("movies_metadata.csv");
    let mut bytes = std::fs::read(&path).unwrap();
    let title = b"Movie 2";
    let at = bytes
        .windows(title.len())
        .position(|w| w == &title[..])
        .unwrap();
    bytes.insert(at + title.len(), 0xff);
    std::fs::write(&path, bytes).unwrap();

    let settings = fixture.settings();
    let silver = DataRepository::new(settings.silver_dir());
    Pipeline::new(settings).run_transformation().unwrap();

    let movies: Vec<Movie> = silver.read_table().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Movie 1");
    assert!(movies[1].title.starts_with("Movie 2"));
    assert!(movies[1].title.contains('\u{FFFD}'));
}
