//! Core library: corpus loading, TF-IDF vectorization, similarity ranking,
//! related-question recommendations and LLM-backed text assistants.

pub mod assist;
pub mod config;
pub mod context;
pub mod corpus;
pub mod error;
pub mod models;
pub mod ranker;
pub mod recommend;
pub mod store;
pub mod tokenizer;
pub mod vectorizer;
