//! `seed` command - sample documents for a fresh knowledge base

use crate::domain::ingestion::{Document, SOURCE_KEY};
use crate::AppContext;

const ML_INTRO: &str = "Introduction to Machine Learning

Machine Learning is a subset of artificial intelligence that enables systems to learn
and improve from experience without being explicitly programmed. It focuses on the
development of computer programs that can access data and use it to learn for themselves.

Key Concepts:
1. Supervised Learning: Learning with labeled data
2. Unsupervised Learning: Finding patterns in unlabeled data
3. Reinforcement Learning: Learning through interaction and rewards

Applications include image recognition, natural language processing, and recommendation systems.";

const PYTHON_BASICS: &str = "Python Programming Basics

Python is a high-level, interpreted programming language known for its simplicity and readability.

Key Features:
- Dynamic typing
- Automatic memory management
- Extensive standard library
- Support for multiple programming paradigms

Basic Syntax:
- Variables: x = 10
- Functions: def my_function():
- Loops: for i in range(10):
- Conditionals: if condition:

Python is widely used in web development, data science, and AI applications.";

const PHOTOSYNTHESIS: &str = "Photosynthesis Process

Photosynthesis is the process by which plants convert light energy into chemical energy.

The process occurs in two main stages:
1. Light-dependent reactions: Capture light energy and convert it to ATP and NADPH
2. Light-independent reactions (Calvin Cycle): Use ATP and NADPH to produce glucose

Key Equation: 6CO2 + 6H2O + light energy → C6H12O6 + 6O2

Factors affecting photosynthesis:
- Light intensity
- Carbon dioxide concentration
- Temperature
- Water availability

This process is essential for life on Earth as it produces oxygen and organic compounds.";

/// The three built-in sample documents
pub fn sample_documents() -> Vec<Document> {
    [
        (ML_INTRO, "sample_ml_intro.txt", "Machine Learning"),
        (PYTHON_BASICS, "sample_python.txt", "Python Programming"),
        (PHOTOSYNTHESIS, "sample_photosynthesis.txt", "Biology"),
    ]
    .into_iter()
    .map(|(content, source, topic)| {
        Document::new(content)
            .with_metadata(SOURCE_KEY, source)
            .with_metadata("topic", topic)
    })
    .collect()
}

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let documents = sample_documents();
    let result = ctx.rag.ingest(&documents, None).await?;

    println!(
        "Knowledge base initialized with sample documents ({} documents, {} chunks)",
        result.documents, result.chunks
    );

    Ok(())
}
