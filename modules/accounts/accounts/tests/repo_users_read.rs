#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Read paths of the user repository.

mod support;

use accounts::{Expand, UserField, UsersRepository, ViewsRepository};
use support::{repos, seed_user, seed_view};

#[tokio::test]
async fn empty_store_lists_nothing() {
    let (users, _) = repos().await;

    assert!(users.get_all().await.unwrap().is_empty());
    assert!(users.get_administrators().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_all_is_ordered_by_id() {
    let (users, _) = repos().await;
    let c = seed_user(&users, "c@example.com", "Acme").await;
    let a = seed_user(&users, "a@example.com", "Acme").await;
    let b = seed_user(&users, "b@example.com", "Globex").await;

    let ids: Vec<i64> = users.get_all().await.unwrap().iter().map(|u| u.id).collect();
    let mut expected = vec![c.id, a.id, b.id];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn get_administrators_returns_only_admins() {
    let (users, _) = repos().await;
    seed_user(&users, "plain@example.com", "Acme").await;
    let mut boss = seed_user(&users, "boss@example.com", "Acme").await;
    let mut root = seed_user(&users, "root@example.com", "Globex").await;

    boss.admin = true;
    users.save(&mut boss, &[UserField::Admin]).await.unwrap();
    root.admin = true;
    users.save(&mut root, &[UserField::Admin]).await.unwrap();

    let admins = users.get_administrators().await.unwrap();
    let emails: Vec<&str> = admins.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["boss@example.com", "root@example.com"]);
    assert!(admins.iter().all(|u| u.admin));
}

#[tokio::test]
async fn get_by_id_of_unknown_id_is_none() {
    let (users, _) = repos().await;

    assert!(users.get_by_id(404, Expand::None).await.unwrap().is_none());
    assert!(
        users
            .get_by_id(404, Expand::OwnershipsWithGroups)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn get_by_email_lower_cases_input() {
    let (users, _) = repos().await;
    let jane = seed_user(&users, "jane@example.com", "Acme").await;

    let found = users.get_by_email("JANE@Example.Com").await.unwrap().unwrap();
    assert_eq!(found.id, jane.id);
    assert!(users.get_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_email_matches_escaped_stored_address() {
    let (users, _) = repos().await;
    let tom = seed_user(&users, "Tom&Jerry@Example.com", "Acme").await;
    assert_eq!(tom.email, "tom&amp;jerry@example.com");

    let found = users.get_by_email("tom&jerry@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, tom.id);

    let again = users.get_by_email(&tom.email).await.unwrap().unwrap();
    assert_eq!(again.id, tom.id);
}

#[tokio::test]
async fn expansion_levels_load_progressively_more() {
    let (users, views) = repos().await;
    let jane = seed_user(&users, "jane@example.com", "Acme").await;
    let (group, dmz) = seed_view(&views, Some("Perimeter"), Some(jane.id), "DMZ").await;
    let (_, lab) = seed_view(&views, None, None, "Lab").await;
    let first = views.grant(jane.id, dmz.id).await.unwrap();
    let second = views.grant(jane.id, lab.id).await.unwrap();

    let plain = users.get_by_id(jane.id, Expand::None).await.unwrap().unwrap();
    assert!(plain.ownerships.is_empty());

    let shallow = users
        .get_by_id(jane.id, Expand::Ownerships)
        .await
        .unwrap()
        .unwrap();
    let ids: Vec<i64> = shallow.ownerships.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert!(shallow.ownerships.iter().all(|o| o.view.is_none()));

    let deep = users
        .get_by_id(jane.id, Expand::OwnershipsWithGroups)
        .await
        .unwrap()
        .unwrap();
    let view = deep.ownerships[0].view.as_ref().unwrap();
    assert_eq!(view.name, "DMZ");
    assert_eq!(view.group.as_ref().unwrap(), &group);
    let unnamed = deep.ownerships[1].view.as_ref().unwrap();
    assert_eq!(unnamed.name, "Lab");
    assert_eq!(unnamed.group.as_ref().unwrap().name, None);
}

#[tokio::test]
async fn list_operations_never_expand() {
    let (users, views) = repos().await;
    let jane = seed_user(&users, "jane@example.com", "Acme").await;
    let (_, dmz) = seed_view(&views, Some("Perimeter"), None, "DMZ").await;
    views.grant(jane.id, dmz.id).await.unwrap();

    let all = users.get_all().await.unwrap();
    assert!(all[0].ownerships.is_empty());
}
