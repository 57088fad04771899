//! End-to-end storefront flow over on-disk slots.

use giftshop_cart::{CheckoutRequest, PaymentMethod, ShippingMethod};
use giftshop_catalog::{Category, FilterCriteria, GiftCardValue, SortKey};
use giftshop_core::Money;
use giftshop_infra::{
    ACCESS_SLOT, CART_SLOT, FileStorage, StateStorage, Storefront, StorefrontConfig,
};

fn open(dir: &std::path::Path) -> Storefront<FileStorage> {
    let storage = FileStorage::new(dir).unwrap();
    Storefront::open(StorefrontConfig::default(), storage).unwrap()
}

#[test]
fn unlock_browse_fill_cart_and_check_out_across_restarts() {
    let tmp = tempfile::tempdir().unwrap();

    {
        let mut shop = open(tmp.path());
        assert!(!shop.access().check_access());
        assert!(shop.access_mut().unlock("NATILLAS").is_err());
        shop.access_mut().unlock("natillas").unwrap();

        let necklaces = shop
            .catalog()
            .filter(&FilterCriteria::new().category(Category::Necklaces));
        let cheapest_first: Vec<_> = shop
            .catalog()
            .sort(necklaces, SortKey::PriceAsc)
            .into_iter()
            .filter(|p| !p.is_special())
            .cloned()
            .collect();
        assert_eq!(cheapest_first[0].slug().as_str(), "collar-cote-azul-dream");

        let cart = shop.cart_mut();
        cart.add_item(&cheapest_first[0], "hecho-a-mano", None);
        cart.add_item(&cheapest_first[0], "hecho-a-mano", None);
        cart.add_gift_card(GiftCardValue::Fifty);
        assert_eq!(cart.item_count(), 3);
        assert!(!cart.is_degraded());
    }

    assert!(tmp.path().join(format!("{CART_SLOT}.json")).is_file());
    assert!(tmp.path().join(format!("{ACCESS_SLOT}.json")).is_file());

    {
        let mut shop = open(tmp.path());
        assert!(shop.access().check_access());
        // 2 x 14.95 + 50
        assert_eq!(shop.cart().total(), Money::from_cents(7990));

        let discount = shop.cart().redeem_discount("10PERAYLIMON").unwrap();
        let receipt = shop
            .cart_mut()
            .checkout(&CheckoutRequest {
                shipping: ShippingMethod::Standard,
                payment: PaymentMethod::PayPal,
                discount: Some(discount),
            })
            .unwrap();
        // 79.90 - 7.99 + 0
        assert_eq!(receipt.summary.total, Money::from_cents(7191));
        assert_eq!(receipt.lines.len(), 2);
    }

    let shop = open(tmp.path());
    assert!(shop.cart().items().is_empty());
    assert!(shop.access().check_access());
}

#[test]
fn stale_slot_version_starts_fresh() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(tmp.path()).unwrap();
    storage
        .save(ACCESS_SLOT, r#"{"state":{"hasAccess":true},"version":1}"#)
        .unwrap();
    storage.save(CART_SLOT, r#"{"state":{"items":"broken"},"version":0}"#).unwrap();

    let shop = open(tmp.path());
    assert!(!shop.access().check_access());
    assert!(shop.cart().items().is_empty());
    assert!(!shop.cart().is_degraded());
}

#[test]
fn cart_slot_uses_storefront_layout() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let mut shop = open(tmp.path());
        shop.cart_mut().add_gift_card(GiftCardValue::OneHundredFifty);
    }

    let raw = FileStorage::new(tmp.path()).unwrap().load(CART_SLOT).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 0);
    let line = &value["state"]["items"][0];
    assert_eq!(line["quantity"], 1);
    assert_eq!(line["selectedMaterial"], "gift-card");
    assert!(line.get("selectedSize").is_none());
    assert_eq!(line["product"]["slug"], "gift-card-150");
}
