//! User store and registry bootstrap against a file-backed database.

mod harness;

use harness::temp_db::TempDb;
use rust_decimal_macros::dec;
use spreadcast::domain::id::UserId;
use spreadcast::domain::money::Volume;
use spreadcast::domain::user::Blacklist;
use spreadcast::infrastructure::bootstrap::load_registry;
use spreadcast::port::outbound::store::UserStore;
use spreadcast::testkit::domain::user;

#[tokio::test]
async fn test_saved_users_survive_reopen() {
    let db = TempDb::create();
    let capped = user(1)
        .with_volume_bounds(dec!(100), dec!(2500))
        .with_total_fee_max(Some(dec!(4.5)))
        .with_spread_bounds(dec!(1), Some(dec!(6)))
        .with_profit_bounds(dec!(20), None)
        .with_daily_turnover_min(dec!(50000))
        .with_contract_check(true)
        .with_blacklist(Blacklist::new().with_coin("Pepe").with_network("trc20"));
    db.store().save_user(&capped, true).unwrap();
    db.store().save_user(&user(2), true).unwrap();
    db.store().save_user(&user(3), false).unwrap();

    let mut users = db.store().load_active_users().await.unwrap();
    users.sort_by_key(|u| u.id());

    assert_eq!(users.len(), 2);
    assert_eq!(users[0], capped);
    assert!(users[0].blacklist().blocks_coin("PEPE"));
    assert!(users[0].blacklist().blocks_network("TRC20"));
    assert_eq!(users[1].volume_max(), Volume::MAX);
    assert_eq!(users[1].total_fee_max(), None);
}

#[tokio::test]
async fn test_resaving_replaces_blacklists() {
    let db = TempDb::create();
    let store = db.store();
    let first = user(1).with_blacklist(Blacklist::new().with_coin("BTC").with_coin("ETH"));
    store.save_user(&first, true).unwrap();
    let second = user(1).with_blacklist(Blacklist::new().with_coin("SOL"));
    store.save_user(&second, true).unwrap();

    let users = store.load_active_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert!(!users[0].blacklist().blocks_coin("BTC"));
    assert!(users[0].blacklist().blocks_coin("SOL"));
    assert_eq!(users[0].blacklist().len(), 1);
}

#[tokio::test]
async fn test_registry_is_seeded_from_the_store() {
    let db = TempDb::create();
    for id in 1..=3 {
        db.store().save_user(&user(id), id != 2).unwrap();
    }

    let registry = load_registry(&db.store()).await.unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.get(UserId::new(1)).is_some());
    assert!(registry.get(UserId::new(2)).is_none());
    assert!(db.dir().join("users.db").exists());
}
