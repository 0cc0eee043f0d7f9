mod backups;
mod concurrency;
mod search_routines;
mod writes;
