use std::sync::Arc;

use anyhow::{Context, bail};
use tracing::info;

use focal_client::{ApiClient, Config, pagers};
use focal_store::{Actions, InteractionStore, ProfileStore, QueryCache, SocialApi};
use focal_types::api::LoginRequest;

const USAGE: &str = "usage: focal <command> [args]

commands:
  login <email> <password>     log in and print the bearer token
  feed [pages]                 print the home feed (default 1 page)
  like <post-id>               like a post
  unlike <post-id>             remove a like
  comment <post-id> <text..>   comment on a post
  follow <username>            follow a user
  unfollow <username>          unfollow a user
  me                           print the viewer's profile and stats

environment: FOCAL_API_URL, FOCAL_TOKEN, FOCAL_HTTP_TIMEOUT_SECS (.env is loaded)";

struct App {
    client: Arc<ApiClient>,
    interactions: Arc<InteractionStore>,
    profile: Arc<ProfileStore>,
    cache: Arc<QueryCache>,
    actions: Actions,
}

impl App {
    fn new(client: Arc<ApiClient>) -> Self {
        let interactions = Arc::new(InteractionStore::new());
        let profile = Arc::new(ProfileStore::new());
        let cache = Arc::new(QueryCache::new());
        let actions = Actions::new(
            client.clone() as Arc<dyn SocialApi>,
            interactions.clone(),
            profile.clone(),
            cache.clone(),
        );
        Self {
            client,
            interactions,
            profile,
            cache,
            actions,
        }
    }

    /// Fetch a post and seed the overlay so a mutation on it is legal.
    async fn seed_post(&self, post_id: i64) -> anyhow::Result<()> {
        let post = self.client.get_post(post_id).await?;
        self.interactions.ingest([&post]);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "focal=debug".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        bail!("{USAGE}");
    };

    let config = Config::from_env();
    info!(base_url = %config.base_url, "connecting");
    let app = App::new(Arc::new(ApiClient::new(config)?));

    match command {
        "login" => {
            let email = args.get(1).context("login needs <email> <password>")?;
            let password = args.get(2).context("login needs <email> <password>")?;
            let token = app
                .client
                .login(&LoginRequest {
                    email: email.clone(),
                    password: password.clone(),
                })
                .await?;
            println!("logged in; export FOCAL_TOKEN={}", token.token);
        }
        "feed" => {
            let pages: u32 = match args.get(1) {
                Some(n) => n.parse().context("pages must be a number")?,
                None => 1,
            };
            let pager = pagers::feed_pager(app.client.clone(), app.cache.clone());
            for _ in 0..pages {
                pager.fetch_next_page().await?;
                if !pager.has_next_page() {
                    break;
                }
            }
            let posts = pager.items();
            app.interactions.ingest(posts.iter());
            for post in &posts {
                println!("{}", app.interactions.resolve(post).summary());
            }
            if let Some(total) = pager.total() {
                println!("({} of {} posts)", posts.len(), total);
            }
        }
        "like" => {
            let post_id: i64 = parse_post_id(&args)?;
            app.seed_post(post_id).await?;
            let result = app.actions.like(post_id).await?;
            println!("liked: {} likes now", result.like_count);
        }
        "unlike" => {
            let post_id: i64 = parse_post_id(&args)?;
            app.seed_post(post_id).await?;
            let result = app.actions.unlike(post_id).await?;
            println!("unliked: {} likes now", result.like_count);
        }
        "comment" => {
            let post_id: i64 = parse_post_id(&args)?;
            if args.len() < 3 {
                bail!("comment needs <post-id> <text..>");
            }
            let text = args[2..].join(" ");
            app.seed_post(post_id).await?;
            let posted = app.actions.post_comment(post_id, &text).await?;
            println!("comment #{} posted: {}", posted.id, posted.text);
        }
        "follow" => {
            let username = args.get(1).context("follow needs <username>")?;
            app.actions.follow(username).await?;
            println!("now following @{username}");
        }
        "unfollow" => {
            let username = args.get(1).context("unfollow needs <username>")?;
            app.actions.unfollow(username).await?;
            println!("unfollowed @{username}");
        }
        "me" => {
            let me = app.client.get_me().await?;
            app.profile.set(me.into());
            let snap = app.profile.get().context("profile missing after fetch")?;
            println!("@{} ({})", snap.profile.username, snap.profile.name);
            println!(
                "{} posts, {} followers, {} following, {} likes",
                snap.stats.posts, snap.stats.followers, snap.stats.following, snap.stats.likes
            );
        }
        other => bail!("unknown command '{other}'\n\n{USAGE}"),
    }

    Ok(())
}

fn parse_post_id(args: &[String]) -> anyhow::Result<i64> {
    args.get(1)
        .context("missing <post-id>")?
        .parse()
        .context("<post-id> must be a number")
}
