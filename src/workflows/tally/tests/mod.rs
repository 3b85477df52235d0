mod common;
mod standings;
