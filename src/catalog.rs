//! Bilingual learning content embedded into the binary.

use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::i18n::Localized;
use crate::quiz::Question;

static CONTENT_DIR: Dir = include_dir!("src/content");

/// Course shown when a requested id does not exist.
pub const DEFAULT_COURSE: &str = "soil";

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Chapter {
    pub title: Localized,
    pub body: Localized,
    pub reading_minutes: u32,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Course {
    pub id: String,
    pub title: Localized,
    pub chapters: Vec<Chapter>,
}

/// Display payload of a quiz question.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct QuizCard {
    pub prompt: Localized,
    pub options: Vec<Localized>,
}

#[derive(Deserialize, Clone, Debug)]
struct QuizEntry {
    #[serde(flatten)]
    card: QuizCard,
    correct_answer: usize,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Subject {
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub level: u32,
    pub max_level: u32,
    /// Percent of the current level already done.
    pub progress: u16,
    pub icon: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Diagnosis {
    pub name: Localized,
    pub treatment: Vec<Localized>,
    /// Match confidence in percent.
    pub confidence: u8,
}

#[derive(Deserialize, Debug)]
struct CourseFile {
    courses: Vec<Course>,
}

#[derive(Deserialize)]
struct QuizFile {
    questions: Vec<QuizEntry>,
}

#[derive(Deserialize)]
struct SubjectFile {
    subjects: Vec<Subject>,
}

#[derive(Deserialize)]
struct DiagnosisFile {
    diagnoses: Vec<Diagnosis>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    quiz: Vec<QuizEntry>,
    subjects: Vec<Subject>,
    diagnoses: Vec<Diagnosis>,
}

impl Catalog {
    pub fn load() -> Result<Self, CatalogError> {
        let courses = read_content::<CourseFile>("courses.json")?.courses;
        let quiz = read_content::<QuizFile>("quiz.json")?.questions;
        let subjects = read_content::<SubjectFile>("subjects.json")?.subjects;
        let diagnoses = read_content::<DiagnosisFile>("diagnoses.json")?.diagnoses;
        log::debug!(
            "catalog loaded: {} courses, {} quiz questions, {} subjects, {} diagnoses",
            courses.len(),
            quiz.len(),
            subjects.len(),
            diagnoses.len()
        );
        Ok(Self {
            courses,
            quiz,
            subjects,
            diagnoses,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Looks a course up by id, falling back to the default course.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.course_strict(id)
            .ok()
            .or_else(|| self.courses.iter().find(|c| c.id == DEFAULT_COURSE))
    }

    pub fn course_strict(&self, id: &str) -> Result<&Course, CatalogError> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::UnknownCourse(id.to_string()))
    }

    pub fn daily_quiz(&self) -> Vec<Question<QuizCard>> {
        self.quiz
            .iter()
            .map(|entry| Question::new(entry.card.clone(), entry.correct_answer))
            .collect()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn diagnoses(&self) -> &[Diagnosis] {
        &self.diagnoses
    }
}

fn read_content<T: DeserializeOwned>(file_name: &str) -> Result<T, CatalogError> {
    let file = CONTENT_DIR
        .get_file(file_name)
        .ok_or_else(|| CatalogError::MissingFile(file_name.to_string()))?;
    let text = file
        .contents_utf8()
        .ok_or_else(|| CatalogError::NotUtf8(file_name.to_string()))?;
    Ok(serde_json::from_str(text)?)
}
