//! Pager constructors for every paginated endpoint.
//!
//! Each function wires a [`Pager`] to its endpoint with the app's default
//! page size and the matching [`QueryKey`], so views only decide *which*
//! list to show.

use std::sync::Arc;

use focal_store::{Pager, QueryCache, QueryKey, limits};
use focal_types::api::PageParams;
use focal_types::models::{Comment, LikedPost, Liker, Post, SavedPost, UserSummary};

use crate::ApiClient;

// Clones the client Arc into a boxed fetch future.
macro_rules! pager_over {
    ($client:ident => $call:expr) => {{
        let $client = $client.clone();
        Box::pin(async move { $call.await })
    }};
}

pub fn feed_pager(client: Arc<ApiClient>, cache: Arc<QueryCache>) -> Arc<Pager<Post>> {
    Pager::new(cache, QueryKey::Feed, limits::FEED, move |page, limit| {
        pager_over!(client => client.get_feed(PageParams { page, limit }))
    })
}

pub fn comments_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    post_id: i64,
) -> Arc<Pager<Comment>> {
    Pager::new(
        cache,
        QueryKey::Comments(post_id),
        limits::COMMENTS,
        move |page, limit| {
            pager_over!(client =>
                client.get_comments(post_id, PageParams { page, limit }))
        },
    )
}

pub fn post_likes_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    post_id: i64,
) -> Arc<Pager<Liker>> {
    Pager::new(
        cache,
        QueryKey::PostLikes(post_id),
        limits::POST_LIKES,
        move |page, limit| {
            pager_over!(client =>
                client.get_post_likes(post_id, PageParams { page, limit }))
        },
    )
}

pub fn my_likes_pager(client: Arc<ApiClient>, cache: Arc<QueryCache>) -> Arc<Pager<LikedPost>> {
    Pager::new(
        cache,
        QueryKey::MyLikes,
        limits::MY_LIKES,
        move |page, limit| {
            pager_over!(client => client.get_my_likes(PageParams { page, limit }))
        },
    )
}

pub fn my_saved_pager(client: Arc<ApiClient>, cache: Arc<QueryCache>) -> Arc<Pager<SavedPost>> {
    Pager::new(
        cache,
        QueryKey::MySaved,
        limits::MY_SAVED,
        move |page, limit| {
            pager_over!(client => client.get_my_saved(PageParams { page, limit }))
        },
    )
}

pub fn my_followers_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
) -> Arc<Pager<UserSummary>> {
    Pager::new(
        cache,
        QueryKey::MyFollowers,
        limits::FOLLOWERS,
        move |page, limit| {
            pager_over!(client =>
                client.get_my_followers(PageParams { page, limit }))
        },
    )
}

pub fn my_following_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
) -> Arc<Pager<UserSummary>> {
    Pager::new(
        cache,
        QueryKey::MyFollowing,
        limits::MY_FOLLOWING,
        move |page, limit| {
            pager_over!(client =>
                client.get_my_following(PageParams { page, limit }))
        },
    )
}

pub fn user_posts_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    username: &str,
) -> Arc<Pager<Post>> {
    let username = username.to_string();
    let key = QueryKey::UserPosts(username.clone());
    Pager::new(cache, key, limits::FEED, move |page, limit| {
        let username = username.clone();
        pager_over!(client =>
            client.get_user_posts(&username, PageParams { page, limit }))
    })
}

pub fn user_likes_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    username: &str,
) -> Arc<Pager<Post>> {
    let username = username.to_string();
    let key = QueryKey::UserLikes(username.clone());
    Pager::new(cache, key, limits::MY_LIKES, move |page, limit| {
        let username = username.clone();
        pager_over!(client =>
            client.get_user_likes(&username, PageParams { page, limit }))
    })
}

pub fn user_followers_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    username: &str,
) -> Arc<Pager<UserSummary>> {
    let username = username.to_string();
    let key = QueryKey::UserFollowers(username.clone());
    Pager::new(cache, key, limits::FOLLOWERS, move |page, limit| {
        let username = username.clone();
        pager_over!(client =>
            client.get_user_followers(&username, PageParams { page, limit }))
    })
}

pub fn user_following_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    username: &str,
) -> Arc<Pager<UserSummary>> {
    let username = username.to_string();
    let key = QueryKey::UserFollowing(username.clone());
    Pager::new(cache, key, limits::FOLLOWERS, move |page, limit| {
        let username = username.clone();
        pager_over!(client =>
            client.get_user_following(&username, PageParams { page, limit }))
    })
}

pub fn user_search_pager(
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    query: &str,
) -> Arc<Pager<UserSummary>> {
    let query = query.to_string();
    let key = QueryKey::UserSearch(query.clone());
    Pager::new(cache, key, limits::USER_SEARCH, move |page, limit| {
        let query = query.clone();
        pager_over!(client =>
            client.search_users(&query, PageParams { page, limit }))
    })
}
