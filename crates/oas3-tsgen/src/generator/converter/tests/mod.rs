mod operations;
mod relations;
