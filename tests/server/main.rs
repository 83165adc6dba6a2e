mod authors_api;
mod books_api;
mod helpers;
mod likes_api;
