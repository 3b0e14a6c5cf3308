//! GitHub users.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::object::Completable;
use crate::traits::{repr_value, CompletableResource, Context, Resource};

/// A GitHub user (or organization seen through a user endpoint).
///
/// Usually obtained embedded in another payload (`issue.user`,
/// `comment.user`), in which case only the summary fields are seeded and the
/// rest are completed on demand from `users/{login}`.
pub type NamedUser = Completable<NamedUserData>;

/// Field table of a [`NamedUser`].
#[derive(Debug, Default)]
pub struct NamedUserData {
    login: Attribute<String>,
    id: Attribute<u64>,
    name: Attribute<Option<String>>,
    email: Attribute<Option<String>>,
    company: Attribute<Option<String>>,
    bio: Attribute<Option<String>>,
    location: Attribute<Option<String>>,
    user_type: Attribute<String>,
    site_admin: Attribute<bool>,
    avatar_url: Attribute<String>,
    html_url: Attribute<String>,
    public_repos: Attribute<u64>,
    followers: Attribute<u64>,
    following: Attribute<u64>,
    created_at: Attribute<DateTime<Utc>>,
    url: Attribute<String>,
}

impl Resource for NamedUserData {
    const NAME: &'static str = "NamedUser";

    fn use_attributes(&mut self, _ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.login.assign(attributes, "login");
        self.id.assign(attributes, "id");
        self.name.assign(attributes, "name");
        self.email.assign(attributes, "email");
        self.company.assign(attributes, "company");
        self.bio.assign(attributes, "bio");
        self.location.assign(attributes, "location");
        self.user_type.assign(attributes, "type");
        self.site_admin.assign(attributes, "site_admin");
        self.avatar_url.assign(attributes, "avatar_url");
        self.html_url.assign(attributes, "html_url");
        self.public_repos.assign(attributes, "public_repos");
        self.followers.assign(attributes, "followers");
        self.following.assign(attributes, "following");
        self.created_at.assign(attributes, "created_at");
        self.url.assign(attributes, "url");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![("login", repr_value(&self.login))]
    }
}

impl CompletableResource for NamedUserData {
    fn url(&self) -> &Attribute<String> {
        &self.url
    }
}

impl NamedUser {
    pub async fn login(&mut self) -> Result<&str> {
        self.attr("login", |d| &d.login).await.map(String::as_str)
    }

    pub async fn id(&mut self) -> Result<u64> {
        self.attr("id", |d| &d.id).await.copied()
    }

    /// Display name, if the user set one.
    pub async fn name(&mut self) -> Result<Option<&str>> {
        self.attr("name", |d| &d.name).await.map(Option::as_deref)
    }

    /// Public email, if any.
    pub async fn email(&mut self) -> Result<Option<&str>> {
        self.attr("email", |d| &d.email).await.map(Option::as_deref)
    }

    pub async fn company(&mut self) -> Result<Option<&str>> {
        self.attr("company", |d| &d.company).await.map(Option::as_deref)
    }

    pub async fn bio(&mut self) -> Result<Option<&str>> {
        self.attr("bio", |d| &d.bio).await.map(Option::as_deref)
    }

    pub async fn location(&mut self) -> Result<Option<&str>> {
        self.attr("location", |d| &d.location).await.map(Option::as_deref)
    }

    /// `User`, `Organization` or `Bot`.
    pub async fn user_type(&mut self) -> Result<&str> {
        self.attr("type", |d| &d.user_type).await.map(String::as_str)
    }

    pub async fn site_admin(&mut self) -> Result<bool> {
        self.attr("site_admin", |d| &d.site_admin).await.copied()
    }

    pub async fn avatar_url(&mut self) -> Result<&str> {
        self.attr("avatar_url", |d| &d.avatar_url).await.map(String::as_str)
    }

    pub async fn html_url(&mut self) -> Result<&str> {
        self.attr("html_url", |d| &d.html_url).await.map(String::as_str)
    }

    pub async fn public_repos(&mut self) -> Result<u64> {
        self.attr("public_repos", |d| &d.public_repos).await.copied()
    }

    pub async fn followers(&mut self) -> Result<u64> {
        self.attr("followers", |d| &d.followers).await.copied()
    }

    pub async fn following(&mut self) -> Result<u64> {
        self.attr("following", |d| &d.following).await.copied()
    }

    pub async fn created_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("created_at", |d| &d.created_at).await.copied()
    }

    /// The login, from seed data only. Never fetches.
    pub(crate) fn peek_login(&self) -> Option<&str> {
        self.identity("login", |d| &d.login).ok().map(String::as_str)
    }
}
