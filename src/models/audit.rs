// src/models/audit.rs

use serde_json::Value;
use uuid::Uuid;

/// Entrada do log de auditoria fiscal. Só é gravada, nunca lida de volta pela aplicação.
#[derive(Debug, Clone)]
pub struct FiscalAuditEntry {
    pub user_id: Uuid,
    pub acao: &'static str,
    pub entidade: &'static str,
    pub entidade_id: Option<Uuid>,
    pub detalhes: Option<Value>,
}

impl FiscalAuditEntry {
    pub fn new(user_id: Uuid, acao: &'static str, entidade: &'static str) -> Self {
        Self { user_id, acao, entidade, entidade_id: None, detalhes: None }
    }

    pub fn entity(mut self, id: Uuid) -> Self {
        self.entidade_id = Some(id);
        self
    }

    pub fn details(mut self, detalhes: Value) -> Self {
        self.detalhes = Some(detalhes);
        self
    }
}
