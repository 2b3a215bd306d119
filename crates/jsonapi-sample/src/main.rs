//! # JSON:API Store Sample
//!
//! A walk through the store against the in-memory backend.
//!
//! ## 🚀 What it does
//!
//! 1. Starts a [`Library`] (models registered, backend running).
//! 2. Creates an [`Author`] and an [`Article`] linked to it.
//! 3. Lists articles with `include=author` and follows the relationship.
//! 4. Updates the article, stores a [`Circle`] through the inherited `shapes` model.
//! 5. Removes the article and shuts down.
//!
//! Run with `RUST_LOG=debug` to see every request.

use jsonapi_sample::backend::BackendClient;
use jsonapi_sample::lifecycle::Library;
use jsonapi_sample::model::{Article, Author, Circle};
use jsonapi_store::resource::link;
use jsonapi_store::tracing::setup_tracing;
use jsonapi_store::{Entity, Params, Store};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting sample library");
    let library = Library::new().map_err(|e| e.to_string())?;

    let span = tracing::info_span!("publishing");
    let article = async { publish(&library.store).await }
        .instrument(span)
        .await?;

    let span = tracing::info_span!("reading");
    async { read(&library.store).await }.instrument(span).await?;

    let span = tracing::info_span!("editing");
    let edited = async { edit(&library.store, article).await }
        .instrument(span)
        .await;
    match edited {
        Ok(title) => info!(%title, "Article edited"),
        Err(e) => error!(error = %e, "Editing failed"),
    }

    let circle = Entity::new(Circle::new("wheel", 2.0));
    let saved = library
        .store
        .save(&circle, None, None)
        .await
        .map_err(|e| e.to_string())?;
    if let Some(circle) = saved.data() {
        info!(id = ?circle.shape.id, area = circle.area(), "Circle stored");
    }

    library.shutdown().await?;
    info!("Sample completed successfully");
    Ok(())
}

fn include(relationships: &str) -> Params {
    Params::from([("include".to_string(), relationships.to_string())])
}

async fn publish(store: &Store<BackendClient>) -> Result<Entity<Article>, String> {
    let author = store
        .save(&Entity::new(Author::new("Ada Lovelace")), None, None)
        .await
        .map_err(|e| e.to_string())?
        .entities()
        .into_iter()
        .next()
        .ok_or("author not returned")?;
    info!(id = ?author.id, "Author created");

    let mut draft = Article::new("Notes on the Analytical Engine", "It weaves algebraic patterns.");
    draft.author = link("people", author.resource());
    let article = store
        .save(&Entity::new(draft), Some(&include("author")), None)
        .await
        .map_err(|e| e.to_string())?
        .entities()
        .into_iter()
        .next()
        .ok_or("article not returned")?;
    info!(id = ?article.id, "Article created");
    Ok(article)
}

async fn read(store: &Store<BackendClient>) -> Result<(), String> {
    let document = store
        .get_list::<Article>(Some(&include("author")), None)
        .await
        .map_err(|e| e.to_string())?;
    info!(total = ?document.meta(), "Articles listed");

    let graph = document.graph();
    for &node in document.nodes() {
        let Some(article) = graph.get::<Article>(node) else {
            continue;
        };
        let author = graph
            .related_one(node, "author")
            .and_then(|author| graph.get::<Author>(author))
            .map(|author| author.name.as_str())
            .unwrap_or("anonymous");
        info!(title = %article.title, author, "Article");
    }
    Ok(())
}

async fn edit(store: &Store<BackendClient>, mut article: Entity<Article>) -> Result<String, String> {
    article.title = "Sketch of the Analytical Engine".to_string();
    let document = store
        .save(&article, None, None)
        .await
        .map_err(|e| e.to_string())?;
    let title = document
        .data()
        .map(|updated| updated.title.clone())
        .unwrap_or_default();

    store
        .remove(&article, None, None)
        .await
        .map_err(|e| e.to_string())?;
    Ok(title)
}
