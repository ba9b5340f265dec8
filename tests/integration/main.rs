//! Integration tests against a real SQLite database

#![allow(dead_code)]

mod accounts;
mod catalog;
mod legacy;
mod common;
mod loans;
mod management;
mod sessions;
