mod book;
mod courses;
mod health_check;
mod submission;
