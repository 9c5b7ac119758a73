// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The built-in classification catalog. Built-ins and user-added custom
//! categories form one namespace of valid (type, category, isExpense) pairs.

use crate::error::LedgerError;
use crate::models::CategoryItem;
use crate::store;
use once_cell::sync::Lazy;
use rusqlite::Connection;

const INCOME_PAIRS: &[(&str, &str)] = &[
    ("Abono Pecuniário", "Benefício Adicional"),
    ("Abono por Tempo de Serviço", "Benefício Adicional"),
    ("Adicional de Insalubridade", "Adicional Salarial"),
    ("Adicional de Periculosidade", "Adicional Salarial"),
    ("Adicional Noturno", "Adicional Salarial"),
    ("Ajuda de Custo", "Reembolso/Benefício"),
    ("Aluguel de Imóvel", "Benefício"),
    ("Aposentadoria", "Benefício de Longo Prazo"),
    ("Auxílio-Alimentação/Refeição", "Benefício"),
    ("Auxílio-Combustível", "Benefício"),
    ("Auxílio-Creche", "Benefício"),
    ("Auxílio-Educação", "Benefício"),
    ("Auxílio-Farmácia", "Benefício"),
    ("Auxílio-Home Office", "Benefício"),
    ("Auxílio-Moradia", "Benefício"),
    ("Bolsas de Estudo", "Benefício"),
    ("Bônus", "Remuneração Variável"),
    ("Cashback", "Benefício"),
    ("Comissões", "Remuneração Variável"),
    ("Décimo Terceiro Salário", "Benefício Adicional"),
    ("Férias Remuneradas", "Benefício Adicional"),
    ("Horas Extras", "Adicional Salarial"),
    ("Participação nos Lucros (PLR)", "Remuneração Variável"),
    ("Salário Base", "Remuneração Fixa"),
    ("Vale-Transporte", "Benefício"),
    ("Outros Recebimentos", "Geral"),
];

const EXPENSE_PAIRS: &[(&str, &str)] = &[
    ("Academia", "Lazer/Bem-estar"),
    ("Aluguel", "Moradia"),
    ("Água", "Contas de Consumo"),
    ("Assinatura de Software", "Serviços Digitais"),
    ("Barbeiro/Cabeleireiro", "Cuidados Pessoais"),
    ("Boletos em geral", "Contas Diversas"),
    ("Cartão de Crédito", "Dívidas"),
    ("Celular", "Telecomunicações"),
    ("Cinema", "Lazer"),
    ("Condomínio", "Moradia"),
    ("Conta de Luz", "Contas de Consumo"),
    ("Educação (Faculdade/Cursos)", "Educação"),
    ("Farmácia/Remédios", "Saúde"),
    ("Feira/Supermercado", "Alimentação"),
    ("Financiamento (Carro/Imóvel)", "Dívidas"),
    ("Gás", "Contas de Consumo"),
    ("Gasolina/Combustível", "Transporte"),
    ("Impostos (IPTU/IPVA/IRPF)", "Tributos"),
    ("Internet/TV", "Telecomunicações"),
    ("Lazer Geral", "Lazer"),
    ("Manutenção Veículo", "Veículo"),
    ("Plano de Saúde", "Saúde"),
    ("Restaurantes/Delivery", "Alimentação"),
    ("Seguros (Vida/Carro)", "Seguros"),
    ("Streaming (Netflix/Spotify)", "Serviços Digitais"),
    ("Transporte (Táxi/Uber/Público)", "Transporte"),
    ("Outras Despesas", "Geral"),
];

pub static BUILTIN: Lazy<Vec<CategoryItem>> = Lazy::new(|| {
    let income = INCOME_PAIRS.iter().map(|(t, c)| CategoryItem {
        r#type: (*t).to_string(),
        category: (*c).to_string(),
        is_expense: false,
    });
    let expense = EXPENSE_PAIRS.iter().map(|(t, c)| CategoryItem {
        r#type: (*t).to_string(),
        category: (*c).to_string(),
        is_expense: true,
    });
    income.chain(expense).collect()
});

fn is_builtin(item: &CategoryItem) -> bool {
    BUILTIN.iter().any(|b| b == item)
}

/// Built-in catalog followed by the user's custom categories.
pub fn all_categories(conn: &Connection) -> Result<Vec<CategoryItem>, LedgerError> {
    let mut all = BUILTIN.clone();
    all.extend(store::all_custom_categories(conn)?);
    Ok(all)
}

/// Whether a (type, category, isExpense) pair is a valid classification,
/// built-in or custom.
pub fn is_known_pair(
    conn: &Connection,
    r#type: &str,
    category: &str,
    is_expense: bool,
) -> Result<bool, LedgerError> {
    let item = CategoryItem {
        r#type: r#type.to_string(),
        category: category.to_string(),
        is_expense,
    };
    if is_builtin(&item) {
        return Ok(true);
    }
    store::custom_category_exists(conn, &item)
}

/// Registers a custom classification pair. Idempotent: an identical call is
/// a no-op, and pairs already covered by the built-in catalog are not stored
/// again. Returns whether anything was added.
pub fn add_custom(conn: &Connection, item: &CategoryItem) -> Result<bool, LedgerError> {
    if is_builtin(item) {
        return Ok(false);
    }
    store::add_custom_category(conn, item)
}
