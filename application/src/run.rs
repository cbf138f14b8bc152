//! Execution of [`Command`]s.

#[cfg(doc)]
use service::domain::Favorite;
use service::{
    command::{Command as _, FollowUser, UnfollowUser},
    domain::{user, Follower, Post, User},
    infra::Http,
    view::{Favorites, FollowingDialog, Profile},
};
use tracing as log;

use crate::{AsError, Command, Error, Service};

/// Runs the provided [`Command`] printing its results to the standard
/// output.
///
/// # Errors
///
/// If the remote API fails or rejects the [`Command`].
pub async fn run(service: Service, command: Command) -> Result<(), Error> {
    match command {
        Command::Profile {
            username,
            pages,
            following,
        } => profile(service, username, pages, following).await,
        Command::Following { username } => {
            let dialog = FollowingDialog::new(service);
            list_following(&dialog, username).await
        }
        Command::Favorites { pages } => favorites(service, pages).await,
        Command::Follow { username } => {
            service
                .execute(FollowUser {
                    username: username.clone(),
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!("followed `{username}`");
            Ok(())
        }
        Command::Unfollow { username } => {
            service
                .execute(UnfollowUser {
                    username: username.clone(),
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!("unfollowed `{username}`");
            Ok(())
        }
    }
}

/// Prints the profile of the [`User`] and the requested number of pages of
/// its [`Post`]s.
async fn profile(
    service: Service,
    username: user::Username,
    pages: u32,
    following: bool,
) -> Result<(), Error> {
    let profile = Profile::open(service, username)
        .await
        .map_err(AsError::into_error)?;

    print_user(&profile.user());
    for _ in 1..pages {
        if !profile.feed().can_load_more() {
            break;
        }
        _ = profile.load_more().await.map_err(AsError::into_error)?;
    }
    for post in profile.feed().items().iter() {
        print_post(post);
    }

    if following {
        println!();
        _ = profile
            .open_following()
            .await
            .map_err(AsError::into_error)?;
        if let Some(list) = profile.following().list() {
            while list.can_load_more() {
                _ = list.load_more().await.map_err(AsError::into_error)?;
            }
            for follower in list.items().iter() {
                print_follower(follower);
            }
        }
        profile.close_following();
    }

    profile.close();
    Ok(())
}

/// Prints every account the provided owner follows.
async fn list_following(
    dialog: &FollowingDialog<Http>,
    owner: user::Username,
) -> Result<(), Error> {
    _ = dialog
        .on_dialog_open(owner)
        .await
        .map_err(AsError::into_error)?;
    while dialog.list().is_some_and(|l| l.can_load_more()) {
        _ = dialog.load_more().await.map_err(AsError::into_error)?;
    }

    if let Some(list) = dialog.list() {
        for follower in list.items().iter() {
            print_follower(follower);
        }
    }
    dialog.close();
    Ok(())
}

/// Prints the requested number of pages of the signed-in user's
/// [`Favorite`]s.
async fn favorites(service: Service, pages: u32) -> Result<(), Error> {
    let favorites = Favorites::open(service)
        .await
        .map_err(AsError::into_error)?;

    for _ in 1..pages {
        if !favorites.feed().can_load_more() {
            break;
        }
        _ = favorites
            .feed()
            .load_more()
            .await
            .map_err(AsError::into_error)?;
    }
    for favorite in favorites.feed().items().iter() {
        print_post(&favorite.post);
    }

    favorites.close();
    Ok(())
}

/// Prints the provided [`User`] profile.
fn print_user(user: &User) {
    println!(
        "{} | {} posts | {} followers | {} following{}",
        user.username,
        user.posts,
        user.followers,
        user.following,
        if user.followed { " | followed" } else { "" },
    );
}

/// Prints the provided [`Post`].
fn print_post(post: &Post) {
    println!(
        "#{} {} {} likes {}",
        post.id,
        post.date.to_rfc3339(),
        post.likes,
        post.description,
    );
}

/// Prints the provided [`Follower`].
fn print_follower(follower: &Follower) {
    println!("@{}", follower.username);
}
