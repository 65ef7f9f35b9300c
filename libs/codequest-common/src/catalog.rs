// Course catalog: the read-only content tree the platform serves.
//
// The catalog is an external collaborator as far as verification is
// concerned: the verifier only ever reads test cases out of it. A built-in
// catalog is compiled in as the default; deployments can override it with a
// JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::TestCase;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A single practice exercise within a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeExercise {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub hints: Vec<String>,
    /// Reference solution shown after the learner passes or gives up.
    pub solution: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// An end-of-course project. Same shape as an exercise; kept as its own type
/// because projects hang off the course, not off a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub hints: Vec<String>,
    pub solution: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub exercises: Vec<PracticeExercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub final_projects: Vec<FinalProject>,
}

/// The full content tree. Read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    /// Look up a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Look up a practice exercise by id across all courses and lessons.
    pub fn exercise(&self, id: &str) -> Option<&PracticeExercise> {
        self.courses
            .iter()
            .flat_map(|c| &c.lessons)
            .flat_map(|l| &l.exercises)
            .find(|e| e.id == id)
    }

    /// Look up a final project by id across all courses.
    pub fn final_project(&self, id: &str) -> Option<&FinalProject> {
        self.courses
            .iter()
            .flat_map(|c| &c.final_projects)
            .find(|p| p.id == id)
    }

    /// Test cases for an exercise or final project with the given id.
    /// Exercises shadow projects when ids collide.
    pub fn test_cases(&self, id: &str) -> Option<&[TestCase]> {
        if let Some(exercise) = self.exercise(id) {
            return Some(&exercise.test_cases);
        }
        self.final_project(id).map(|p| p.test_cases.as_slice())
    }

    /// The compiled-in default catalog: a small C++ fundamentals course.
    pub fn builtin() -> Self {
        Catalog {
            courses: vec![Course {
                id: "cpp-fundamentals".to_string(),
                title: "C++ Fundamentals".to_string(),
                description: "Learn the building blocks of C++: output, input, \
                              control flow, loops and classes."
                    .to_string(),
                lessons: vec![
                    Lesson {
                        id: "hello-world".to_string(),
                        title: "Hello, World!".to_string(),
                        summary: "Printing to the console with std::cout.".to_string(),
                        exercises: vec![PracticeExercise {
                            id: "hello-cout".to_string(),
                            title: "Say hello".to_string(),
                            description: "Write a program that prints \"Hello, World!\"."
                                .to_string(),
                            difficulty: Difficulty::Beginner,
                            hints: vec![
                                "Include the <iostream> header.".to_string(),
                                "std::cout << sends text to the console.".to_string(),
                            ],
                            solution: "#include <iostream>\n\nint main() {\n    \
                                       std::cout << \"Hello, World!\" << std::endl;\n    \
                                       return 0;\n}\n"
                                .to_string(),
                            test_cases: vec![TestCase {
                                input: String::new(),
                                expected_output: Some("Hello, World!".to_string()),
                                output_pattern: None,
                                required_constructs: vec!["cout".to_string()],
                            }],
                        }],
                    },
                    Lesson {
                        id: "control-flow".to_string(),
                        title: "Control flow".to_string(),
                        summary: "Branching with if/else and repeating with loops.".to_string(),
                        exercises: vec![
                            PracticeExercise {
                                id: "even-odd".to_string(),
                                title: "Even or odd".to_string(),
                                description: "Given the number 8, print \"8 is even.\"."
                                    .to_string(),
                                difficulty: Difficulty::Beginner,
                                hints: vec![
                                    "The % operator gives the remainder of a division."
                                        .to_string(),
                                ],
                                solution: "#include <iostream>\n\nint main() {\n    \
                                           int n = 8;\n    if (n % 2 == 0) {\n        \
                                           std::cout << n << \" is even.\" << std::endl;\n    \
                                           } else {\n        std::cout << n << \" is odd.\" \
                                           << std::endl;\n    }\n    return 0;\n}\n"
                                    .to_string(),
                                test_cases: vec![TestCase {
                                    input: String::new(),
                                    expected_output: Some("8 is even.".to_string()),
                                    output_pattern: None,
                                    required_constructs: vec![
                                        "cout".to_string(),
                                        "if".to_string(),
                                    ],
                                }],
                            },
                            PracticeExercise {
                                id: "count-up".to_string(),
                                title: "Count to five".to_string(),
                                description: "Print the numbers 1 through 5 using a for loop."
                                    .to_string(),
                                difficulty: Difficulty::Intermediate,
                                hints: vec!["for (int i = 1; i <= 5; i++)".to_string()],
                                solution: "#include <iostream>\n\nint main() {\n    \
                                           for (int i = 1; i <= 5; i++) {\n        \
                                           std::cout << i << std::endl;\n    }\n    \
                                           return 0;\n}\n"
                                    .to_string(),
                                test_cases: vec![TestCase {
                                    input: String::new(),
                                    expected_output: None,
                                    output_pattern: Some(r"1\s*2\s*3\s*4\s*5".to_string()),
                                    required_constructs: vec!["for".to_string()],
                                }],
                            },
                        ],
                    },
                ],
                final_projects: vec![FinalProject {
                    id: "grade-book".to_string(),
                    title: "Grade book".to_string(),
                    description: "Build a GradeBook class that stores five scores in an \
                                  array and prints their average."
                        .to_string(),
                    difficulty: Difficulty::Advanced,
                    hints: vec![
                        "Store the scores in a fixed-size array member.".to_string(),
                        "A member function can loop over the array to sum it.".to_string(),
                    ],
                    solution: "#include <iostream>\n\nclass GradeBook {\npublic:\n    \
                               int scores[5] = {90, 85, 77, 93, 88};\n    double average() \
                               const {\n        int sum = 0;\n        for (int i = 0; i < 5; \
                               i++) {\n            sum += scores[i];\n        }\n        \
                               return sum / 5.0;\n    }\n};\n\nint main() {\n    GradeBook \
                               book;\n    std::cout << \"Average: \" << book.average() << \
                               std::endl;\n    return 0;\n}\n"
                        .to_string(),
                    test_cases: vec![TestCase {
                        input: String::new(),
                        expected_output: None,
                        output_pattern: Some(r"Average:\s*86\.6".to_string()),
                        required_constructs: vec![
                            "class".to_string(),
                            "array".to_string(),
                            "for".to_string(),
                        ],
                    }],
                }],
            }],
        }
    }
}
