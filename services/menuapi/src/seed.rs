//! Startup data for the in-memory store.
//!
//! # Purpose
//! Provides the built-in menu and user tables and loads replacement tables
//! from YAML. Every seed is validated before the store is built from it.
//!
//! # Invariants
//! - User ids, dish ids and dish names (case-insensitive) are unique.
//! - Each user's favorites are distinct and reference seeded dishes.
use crate::model::{Dish, Role, User};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Seed {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read seed file: {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("load seed file: {}", path.display()))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let seed: Seed = serde_yaml::from_str(contents).context("parse seed yaml")?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn validate(&self) -> Result<()> {
        let mut dish_ids = HashSet::new();
        let mut dish_names = HashSet::new();
        for dish in &self.dishes {
            if !dish_ids.insert(dish.id) {
                bail!("duplicate dish id {}", dish.id);
            }
            if !dish_names.insert(dish.name.to_lowercase()) {
                bail!("duplicate dish name {:?}", dish.name);
            }
        }

        let mut user_ids = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.id) {
                bail!("duplicate user id {}", user.id);
            }
            let mut seen = HashSet::new();
            for dish_id in &user.favorites {
                if !seen.insert(*dish_id) {
                    bail!("user {} lists dish {} twice in favorites", user.id, dish_id);
                }
                if !dish_ids.contains(dish_id) {
                    bail!("user {} favorites unknown dish {}", user.id, dish_id);
                }
            }
        }
        Ok(())
    }

    /// The menu and user tables the service ships with.
    pub fn builtin() -> Self {
        Self {
            dishes: builtin_dishes(),
            users: builtin_users(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn dish(
    id: i64,
    name: &str,
    description: &str,
    category: &str,
    ingredients: &str,
    rating: f64,
    views: u64,
    publication_date: &str,
    img: &str,
) -> Dish {
    Dish {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        ingredients: ingredients.to_string(),
        rating,
        views,
        publication_date: Some(publication_date.to_string()),
        img: Some(img.to_string()),
    }
}

fn builtin_dishes() -> Vec<Dish> {
    vec![
        dish(
            1,
            "Frango à Parmegiana",
            "Filé de frango empanado coberto com molho de tomate e queijo derretido.",
            "Aves",
            "frango, farinha de rosca, ovos, molho de tomate, queijo muçarela",
            4.2,
            1000,
            "2025-02-16",
            "https://www.unileverfoodsolutions.com.br/dam/global-ufs/mcos/SLA/calcmenu/recipes/BR-recipes/general/frango-à-parmegiana-com-chips-de-batata-doce/main-header.jpg",
        ),
        dish(
            2,
            "Lasanha de Carne",
            "Camadas de massa intercaladas com molho de carne e queijo.",
            "Italiana",
            "massa para lasanha, carne moída, molho de tomate, queijo muçarela, queijo parmesão",
            4.5,
            376,
            "2025-02-15",
            "https://static.itdg.com.br/images/640-440/ec2a5e38702c60bf1ace0b5f1c8e9415/shutterstock-739787011.jpg",
        ),
        dish(
            3,
            "Salada Caesar",
            "Salada clássica com alface, croutons, queijo parmesão e molho Caesar.",
            "Saladas",
            "alface romana, croutons, queijo parmesão, molho Caesar",
            4.0,
            500,
            "2025-02-14",
            "https://static.itdg.com.br/images/1200-675/3f0787cb6db2f0db10269fc45bd8abee/shutterstock-1078415420.jpg",
        ),
        dish(
            4,
            "Sushi Variado",
            "Seleção de sushi com peixes frescos e arroz temperado.",
            "Japonês",
            "arroz para sushi, salmão, atum, alga nori, molho de soja",
            4.8,
            253,
            "2025-02-13",
            "https://djapa.com.br/wp-content/uploads/2021/09/tipos-de-sushi.jpg",
        ),
        dish(
            5,
            "Feijoada",
            "Prato tradicional brasileiro com feijão preto e diversas carnes.",
            "Brasileira",
            "feijão preto, linguiça, carne seca, costela de porco, folhas de louro",
            4.7,
            250,
            "2025-02-12",
            "https://www.ogastronomo.com.br/upload/705030785-descubra-os-diferentes-tipos-de-feijoada.jpg",
        ),
        dish(
            6,
            "Risoto de Cogumelos",
            "Risoto cremoso preparado com cogumelos frescos.",
            "Italiana",
            "arroz arbóreo, cogumelos, caldo de legumes, cebola, queijo parmesão",
            4.3,
            145,
            "2025-02-08",
            "https://www.cozinhatecnica.com/wp-content/uploads/2021/12/receita-de-risoto-de-cogumelos-500x500.jpg",
        ),
        dish(
            7,
            "Tacos de Carne",
            "Tortilhas de milho recheadas com carne temperada e acompanhamentos.",
            "Carnes Premium",
            "tortilhas de milho, carne moída, alface, tomate, queijo cheddar",
            4.1,
            12,
            "2025-02-07",
            "https://guiadacozinha.com.br/wp-content/uploads/2019/10/taco-de-carne-16212.jpg",
        ),
        dish(
            8,
            "Bolo de Chocolate",
            "Bolo macio e úmido com cobertura de chocolate.",
            "Sobremesas",
            "farinha de trigo, açúcar, ovos, chocolate em pó, manteiga",
            4.6,
            925,
            "2025-02-06",
            "https://cdn.casaeculinaria.com/wp-content/uploads/2022/10/04101905/Bolo-de-chocolate-2.webp",
        ),
    ]
}

fn user(id: i64, name: &str, login: &str, password: &str, favorites: &[i64], role: Role) -> User {
    User {
        id,
        name: name.to_string(),
        login: login.to_string(),
        password: password.to_string(),
        role,
        favorites: favorites.to_vec(),
    }
}

fn builtin_users() -> Vec<User> {
    vec![
        user(1, "João Silva", "joao.silva", "js123456", &[], Role::User),
        user(2, "Maria Oliveira", "maria.oliveira", "mo654321", &[2], Role::User),
        user(3, "Carlos Souza", "carlos.souza", "cs987654", &[2, 3], Role::User),
        user(4, "Ana Costa", "ana.costa", "ac456789", &[5, 6], Role::User),
        user(5, "Pedro Santos", "pedro.santos", "ps123789", &[], Role::User),
        user(6, "Mariana Lima", "mariana.lima", "ml321654", &[], Role::User),
        user(7, "Lucas Pereira", "lucas.pereira", "lp789123", &[7, 8], Role::User),
        user(8, "Fernanda Rocha", "fernanda.rocha", "fr456123", &[], Role::Admin),
        user(9, "Rafael Almeida", "rafael.almeida", "ra654987", &[], Role::Admin),
        user(10, "Juliana Ferreira", "juliana.ferreira", "jf987321", &[], Role::Admin),
    ]
}
