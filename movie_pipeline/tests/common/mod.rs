#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use movie_pipeline::Settings;
use tempfile::TempDir;

pub const MOVIES_HEADER: &str = "id,title,original_title,original_language,overview,tagline,imdb_id,\
status,budget,revenue,release_date,runtime,popularity,vote_average,vote_count,genres,\
production_companies,production_countries,spoken_languages";

/// One raw catalog row. Every field is text, exactly as it appears in the CSV.
#[derive(Debug, Clone)]
pub struct MovieRow {
    pub id: String,
    pub title: String,
    pub status: String,
    pub budget: String,
    pub revenue: String,
    pub release_date: String,
    pub runtime: String,
    pub popularity: String,
    pub vote_average: String,
    pub vote_count: String,
    pub genres: String,
}

pub fn movie(id: &str, budget: &str, revenue: &str, release_date: &str) -> MovieRow {
    MovieRow {
        id: id.to_string(),
        title: format!("Movie {id}"),
        status: "Released".to_string(),
        budget: budget.to_string(),
        revenue: revenue.to_string(),
        release_date: release_date.to_string(),
        runtime: "100.0".to_string(),
        popularity: "1.5".to_string(),
        vote_average: "6.5".to_string(),
        vote_count: "10".to_string(),
        genres: "[]".to_string(),
    }
}

impl MovieRow {
    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = named_list(genres);
        self
    }

    pub fn with_votes(mut self, average: &str, count: &str) -> Self {
        self.vote_average = average.to_string();
        self.vote_count = count.to_string();
        self
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.title.clone(),
            "en".to_string(),
            String::new(),
            String::new(),
            String::new(),
            self.status.clone(),
            self.budget.clone(),
            self.revenue.clone(),
            self.release_date.clone(),
            self.runtime.clone(),
            self.popularity.clone(),
            self.vote_average.clone(),
            self.vote_count.clone(),
            self.genres.clone(),
            "[{'name': 'Pixar Animation Studios', 'id': 3}]".to_string(),
            "[{'iso_3166_1': 'US', 'name': 'United States of America'}]".to_string(),
            "[{'iso_639_1': 'en', 'name': 'English'}]".to_string(),
        ]
    }
}

/// `[{'id': 1, 'name': 'A'}, ...]` in the catalog's literal notation.
pub fn named_list(names: &[&str]) -> String {
    let entries: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{{'id': {i}, 'name': '{name}'}}"))
        .collect();
    format!("[{}]", entries.join(", "))
}

pub fn crew(director: Option<&str>) -> String {
    match director {
        Some(name) => format!(
            "[{{'job': 'Producer', 'name': 'Someone Else'}}, {{'job': 'Director', 'name': '{name}'}}]"
        ),
        None => "[{'job': 'Producer', 'name': 'Someone Else'}]".to_string(),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv(header: &str, rows: &[Vec<String>]) -> String {
    let mut out = format!("{header}\n");
    for row in rows {
        let line: Vec<String> = row.iter().map(|f| quote(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// A temporary data directory with raw CSV files in its bronze layer.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("tempdir"),
        };
        fs::create_dir_all(fixture.bronze_dir()).expect("bronze dir");
        fixture
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn bronze_dir(&self) -> PathBuf {
        self.data_dir().join("raw")
    }

    pub fn settings(&self) -> Settings {
        Settings::default().with_overrides(None, Some(self.data_dir()))
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.bronze_dir().join(name), contents).expect("write raw file");
    }

    pub fn write_movies(&self, rows: &[MovieRow]) {
        let rows: Vec<Vec<String>> = rows.iter().map(MovieRow::fields).collect();
        self.write("movies_metadata.csv", &csv(MOVIES_HEADER, &rows));
    }

    /// `(id, cast names, director)` per row.
    pub fn write_credits(&self, rows: &[(&str, &[&str], Option<&str>)]) {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|(id, cast, director)| vec![named_list(cast), crew(*director), id.to_string()])
            .collect();
        self.write("credits.csv", &csv("cast,crew,id", &rows));
    }

    pub fn write_keywords(&self, rows: &[(&str, &[&str])]) {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|(id, keywords)| vec![id.to_string(), named_list(keywords)])
            .collect();
        self.write("keywords.csv", &csv("id,keywords", &rows));
    }

    /// `[userId, movieId, rating, timestamp]` per row.
    pub fn write_ratings(&self, rows: &[[&str; 4]]) {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|f| f.to_string()).collect())
            .collect();
        self.write("ratings_small.csv", &csv("userId,movieId,rating,timestamp", &rows));
    }

    pub fn write_raw(&self, name: &str, contents: &str) {
        self.write(name, contents);
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
