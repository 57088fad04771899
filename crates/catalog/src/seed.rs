//! Storefront seed data.

use giftshop_core::{DomainResult, Money};

use crate::catalog::Catalog;
use crate::curation::{Curation, CurationConfig};
use crate::product::{Category, Material, Product, ProductSpec, Tag};

/// The hidden "mystery experience" entry. Listed so its detail page resolves,
/// but not purchasable merchandise.
pub const MYSTERY_EXPERIENCE_SLUG: &str = "experiencia-misteriosa";

fn images(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| (*p).to_string()).collect()
}

fn seed_specs() -> Vec<ProductSpec> {
    vec![
        ProductSpec {
            id: "1".to_string(),
            slug: "collar-cote-azul-dream".to_string(),
            name: "Collar Côte d'Azur Dream".to_string(),
            price: Money::from_cents(1495),
            description: "Inspirado en los atardeceres de la Costa Azul francesa. Este collar artesanal combina cuentas en tonos tierra con una estrella marina azul cobalto que evoca las aguas cristalinas del Mediterráneo.".to_string(),
            short_description: "Elegancia costera mediterránea".to_string(),
            category: Category::Necklaces,
            materials: vec![Material::Handmade],
            sizes: None,
            images: images(&["/images/collar-costa-azul-1.jpg", "/images/collar-costa-azul-2.jpg"]),
            tags: vec![Tag::Bestseller, Tag::Gift],
            details: "Hecho a mano con estrella marina azul cobalto".to_string(),
            care: "Evita el contacto con perfumes para proteger el color de las cuentas.".to_string(),
            is_special: false,
            special_edition: None,
            stock: 5,
        },
        ProductSpec {
            id: "2".to_string(),
            slug: "azulejo-lisboa-soul".to_string(),
            name: "Azulejo Lisboa Reflection".to_string(),
            price: Money::from_cents(1295),
            description: "Tradición portuguesa en un formato contemporáneo. Este azulejo azul y blanco es una pieza decorativa que simboliza la artesanía y el detalle que define a Pera y Limón.".to_string(),
            short_description: "Tradición portuguesa, alma moderna".to_string(),
            category: Category::Bracelets,
            materials: vec![Material::Handmade],
            sizes: None,
            images: images(&[
                "/images/azulejo-portugues-1.jpg",
                "/images/azulejo-portugues-2.jpg",
                "/images/azulejo-portugues-3.jpg",
            ]),
            tags: vec![Tag::New, Tag::Gift],
            details: "Hecho a mano | Estilo portugués clásico".to_string(),
            care: "Una pieza eterna para tu hogar.".to_string(),
            is_special: false,
            special_edition: None,
            stock: 5,
        },
        ProductSpec {
            id: "3".to_string(),
            slug: "collar-amsterdam-smiles".to_string(),
            name: "Collar Ámsterdam Smiles".to_string(),
            price: Money::from_cents(1795),
            description: "Una explosión de color y alegría. Este collar de cuentas artesanales captura la energía de las tardes entre amigos. Una pieza jovial diseñada para quienes no tienen miedo de mostrar su verdadera esencia.".to_string(),
            short_description: "Color y energía artesanal".to_string(),
            category: Category::Necklaces,
            materials: vec![Material::Handmade],
            sizes: None,
            images: images(&[
                "/images/collar-amsterdam-1.jpg",
                "/images/collar-amsterdam-2.jpg",
                "/images/collar-amsterdam-3.jpg",
            ]),
            tags: vec![],
            details: "Hecho a mano con cuentas de colores".to_string(),
            care: "Límpialo con cariño y guárdalo en un lugar seco.".to_string(),
            is_special: false,
            special_edition: None,
            stock: 7,
        },
        ProductSpec {
            id: "4".to_string(),
            slug: MYSTERY_EXPERIENCE_SLUG.to_string(),
            name: "Experiencia Misteriosa".to_string(),
            price: Money::ZERO,
            description: "Algo extraordinario te aguarda en este lugar. Solo la persona más curiosa descubrirá el secreto que aqui se esconde...".to_string(),
            short_description: "?????".to_string(),
            // Listed under necklaces so it shows up in category views.
            category: Category::Necklaces,
            materials: vec![Material::Handmade],
            sizes: None,
            images: images(&["/images/how-to-wrap-present-mc-221206-93309c.webp"]),
            tags: vec![Tag::Special, Tag::Gift, Tag::Mystery],
            details: "Una experiencia única | Solo para los más curiosos".to_string(),
            care: "La curiosidad es tu mejor herramienta.".to_string(),
            is_special: true,
            special_edition: Some("Experiencia Única".to_string()),
            stock: 1,
        },
    ]
}

/// Validated seed products, in display order.
pub fn seed_products() -> DomainResult<Vec<Product>> {
    seed_specs().into_iter().map(Product::new).collect()
}

/// Curation used by the storefront: the mystery experience is hidden from both
/// the featured list and the special highlight. It is only reached by slug.
pub fn storefront_curation() -> CurationConfig {
    CurationConfig {
        featured_exclude_slugs: vec![MYSTERY_EXPERIENCE_SLUG.to_string()],
        special_exclude_slugs: vec![MYSTERY_EXPERIENCE_SLUG.to_string()],
    }
}

/// Seed catalog with the given curation.
pub fn seed_catalog(curation: Curation) -> DomainResult<Catalog> {
    Catalog::new(seed_products()?, curation)
}
