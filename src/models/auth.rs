// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Usuário resolvido a partir do token (os tokens são emitidos pelo serviço de login do ERP)
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,                 // Subject (ID do usuário)
    #[serde(default)]
    pub tenant_id: Option<Uuid>,   // Empresa ativa na sessão
    pub exp: usize,                // Expiration time (quando o token expira)
    pub iat: usize,                // Issued At (quando o token foi criado)
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            tenant_id: claims.tenant_id,
        }
    }
}
