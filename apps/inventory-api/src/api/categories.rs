//! Categories API wiring

use domain_categories::{CategoryService, MongoCategoryRepository};

use crate::state::AppState;

pub fn service(state: &AppState) -> CategoryService<MongoCategoryRepository> {
    let repository =
        MongoCategoryRepository::new(&state.db).with_timeout(state.config.store_timeout);
    CategoryService::new(repository)
}
