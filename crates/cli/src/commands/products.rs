use chrono::Utc;
use clap::{Args, Subcommand};
use flavorforge_core::catalog::{ProductQuery, ProductSort};
use flavorforge_core::domain::concept::TargetDemographic;
use flavorforge_core::domain::product::ProductDraft;

use crate::commands::{open_engine, CommandResult};

#[derive(Debug, Clone, Subcommand)]
pub enum ProductsAction {
    #[command(about = "List catalog products with filtering, search, sorting and pagination")]
    List(ListArgs),
    #[command(about = "Score a new product against current trends and assign it the next id")]
    Create(CreateArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<usize>,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, help = "Case-insensitive match against name or ingredients")]
    pub search: Option<String>,
    #[arg(long, default_value = "name", help = "name | market_score | created_date")]
    pub sort_by: String,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub region: String,
    #[arg(long, help = "Comma-separated ingredient list")]
    pub ingredients: String,
    #[arg(long, default_value = "")]
    pub demographic: String,
    #[arg(long, default_value = "")]
    pub flavor_profile: String,
}

pub fn run(action: &ProductsAction) -> CommandResult {
    match action {
        ProductsAction::List(args) => list(args),
        ProductsAction::Create(args) => create(args),
    }
}

pub fn list(args: &ListArgs) -> CommandResult {
    let engine = match open_engine("products") {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let query = ProductQuery {
        page: args.page,
        limit: args.limit,
        category: args.category.clone(),
        search: args.search.clone(),
        sort_by: ProductSort::from_key(&args.sort_by),
    };

    match engine.list_products(&query) {
        Ok(page) => CommandResult::success(
            "products",
            format!(
                "page {} of {} ({} matching products)",
                page.pagination.current_page,
                page.pagination.total_pages,
                page.pagination.total_items
            ),
            &page,
        ),
        Err(error) => CommandResult::rejected("products", error),
    }
}

/// The snapshot is read-only, so the scored product is reported but not stored.
pub fn create(args: &CreateArgs) -> CommandResult {
    let engine = match open_engine("products") {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let draft = ProductDraft {
        name: args.name.clone(),
        category: args.category.clone(),
        target_demographics: TargetDemographic::from_label(&args.demographic),
        region: args.region.clone(),
        ingredients: args.ingredients.clone(),
        flavor_profile: args.flavor_profile.clone(),
    };

    match engine.create_product(draft, Utc::now().date_naive()) {
        Ok(product) => CommandResult::success(
            "products",
            format!("product {} scored {}", product.id.0, product.market_score),
            &product,
        ),
        Err(error) => CommandResult::rejected("products", error),
    }
}
