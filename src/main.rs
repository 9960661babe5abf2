use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

use shopkeep::view::form::ProductForm;
use shopkeep::view::{filter_products, parse_id, render};
use shopkeep::{CatalogStore, DEFAULT_ENDPOINT, FileSlot, HttpSeed};

#[derive(Parser)]
#[command(name = "shopkeep")]
#[command(about = "Browse and curate a product catalog from your terminal")]
struct Cli {
    /// Catalog file to read and write
    #[arg(long, value_name = "FILE", default_value = "shopkeep.json")]
    store: PathBuf,

    /// Endpoint that seeds an empty catalog
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog, newest first
    List {
        /// Keep products whose title or description contains TERM
        #[arg(long, value_name = "TERM")]
        search: Option<String>,

        /// Keep liked products only
        #[arg(long)]
        favorites: bool,
    },
    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },
    /// Add a product to the catalog
    Create {
        /// Product title
        #[arg(long, default_value = "")]
        title: String,

        /// Product description
        #[arg(long, default_value = "")]
        description: String,

        /// Price, e.g. 19.99
        #[arg(long, default_value = "")]
        price: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,

        /// Category name
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Change fields of an existing product
    Edit {
        /// Product id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New price, e.g. 19.99
        #[arg(long)]
        price: Option<String>,

        /// New image URL
        #[arg(long)]
        image: Option<String>,

        /// New category name
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove a product
    Delete {
        /// Product id
        id: i64,
    },
    /// Toggle a product's like flag
    Like {
        /// Product id
        id: i64,
    },
}

fn init_logging(verbose: bool) {
    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let storage = FileSlot::new(&args.store);
    let remote = HttpSeed::new(args.endpoint);
    debug!(
        "Catalog file {:?}, seed endpoint {}",
        storage.path(),
        remote.endpoint()
    );
    let store = CatalogStore::open(storage, remote).await;

    match args.command {
        Commands::List { search, favorites } => run_list(&store, search, favorites).await,
        Commands::Show { id } => run_show(&store, &id).await,
        Commands::Create {
            title,
            description,
            price,
            image,
            category,
        } => {
            let form = ProductForm {
                title,
                description,
                price,
                image,
                category,
            };
            run_create(&store, form).await
        }
        Commands::Edit {
            id,
            title,
            description,
            price,
            image,
            category,
        } => run_edit(&store, id, title, description, price, image, category).await,
        Commands::Delete { id } => run_delete(&store, id).await,
        Commands::Like { id } => run_like(&store, id).await,
    }
}

async fn run_list(
    store: &CatalogStore<FileSlot, HttpSeed>,
    search: Option<String>,
    favorites: bool,
) -> anyhow::Result<()> {
    let snapshot = store.load().await;
    if let Some(error) = &snapshot.error {
        eprintln!("{error}");
    }

    let term = search.unwrap_or_default();
    let visible = filter_products(&snapshot.items, &term, favorites);
    print!("{}", render::list(&visible));
    Ok(())
}

async fn run_show(store: &CatalogStore<FileSlot, HttpSeed>, raw_id: &str) -> anyhow::Result<()> {
    let snapshot = store.load().await;
    if let Some(error) = &snapshot.error {
        eprintln!("{error}");
    }

    let Some(product) = parse_id(raw_id).and_then(|id| snapshot.items.iter().find(|p| p.id == id))
    else {
        anyhow::bail!("No product with id {raw_id}");
    };
    print!("{}", render::detail(product));
    Ok(())
}

async fn run_create(
    store: &CatalogStore<FileSlot, HttpSeed>,
    form: ProductForm,
) -> anyhow::Result<()> {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => anyhow::bail!("Invalid product:\n{errors}"),
    };

    let product = store.create(fields).await;
    println!("Created product {}", product.id);
    Ok(())
}

async fn run_edit(
    store: &CatalogStore<FileSlot, HttpSeed>,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    price: Option<String>,
    image: Option<String>,
    category: Option<String>,
) -> anyhow::Result<()> {
    let snapshot = store.load().await;
    let Some(existing) = snapshot.items.iter().find(|p| p.id == id) else {
        anyhow::bail!("No product with id {id}");
    };

    // Prefill from the current record, then overlay whatever was passed.
    let mut form = ProductForm::from_product(existing);
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(price) = price {
        form.price = price;
    }
    if let Some(image) = image {
        form.image = image;
    }
    if let Some(category) = category {
        form.category = category;
    }

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => anyhow::bail!("Invalid product:\n{errors}"),
    };

    // Id and like flag survive the edit untouched.
    let mut updated = existing.clone();
    updated.title = fields.title;
    updated.description = fields.description;
    updated.price = fields.price;
    updated.image = fields.image;
    updated.category = fields.category;

    if !store.update(updated).await {
        anyhow::bail!("No product with id {id}");
    }
    println!("Updated product {id}");
    Ok(())
}

async fn run_delete(store: &CatalogStore<FileSlot, HttpSeed>, id: i64) -> anyhow::Result<()> {
    if !store.delete(id).await {
        anyhow::bail!("No product with id {id}");
    }
    println!("Deleted product {id}");
    Ok(())
}

async fn run_like(store: &CatalogStore<FileSlot, HttpSeed>, id: i64) -> anyhow::Result<()> {
    match store.toggle_like(id).await {
        Some(true) => println!("Liked product {id}"),
        Some(false) => println!("Unliked product {id}"),
        None => anyhow::bail!("No product with id {id}"),
    }
    Ok(())
}
