// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LeadRepository, UserRepository},
    models::auth::{Claims, User},
    services::shop_service::ShopService,
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    lead_repo: LeadRepository,
    shop_service: ShopService,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        lead_repo: LeadRepository,
        shop_service: ShopService,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, lead_repo, shop_service, jwt_secret, pool }
    }

    /// Registro do dono: só quem tem cadastro (lead) aprovado pelo superadmin.
    /// Usuário, barbearia e conversão do lead acontecem na mesma transação.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<String, AppError> {
        // 1. Hashing (fora da transação, pois não toca no banco)
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
            ?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. O lead aprovado é a "autorização" para criar a conta
        let lead = self.lead_repo
            .find_approved_by_email(&mut *tx, email)
            .await?
            .ok_or(AppError::LeadNotApproved)?;

        // 3. Cria o usuário
        let new_user = self.user_repo
            .create_user(&mut *tx, email, name, &hashed_password)
            .await?;

        // 4. Cria a barbearia com o nome informado no cadastro
        let shop = self.shop_service
            .create_shop(&mut *tx, new_user.id, &lead.shop_name, Some(&lead.phone), None)
            .await?;

        // 5. Lead convertido
        self.lead_repo.mark_converted(&mut *tx, lead.id).await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("🔗 Lead {} convertido: usuário {} / loja {}", lead.id, new_user.id, shop.id);

        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let user_id = self.decode_token(token)?;
        token_owner(self.user_repo.find_by_id(user_id).await?)
    }

    fn decode_token(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims.sub)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// Token assinado para um usuário que já não existe não autentica ninguém
fn token_owner(found: Option<User>) -> Result<User, AppError> {
    found.ok_or(AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ShopRepository;
    use sqlx::postgres::PgPoolOptions;

    fn service(secret: &str) -> AuthService {
        // Pool preguiçoso: estes testes nunca chegam a abrir conexão
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/barbearia_test")
            .expect("url válida");
        AuthService::new(
            UserRepository::new(pool.clone()),
            LeadRepository::new(pool.clone()),
            ShopService::new(ShopRepository::new(pool.clone())),
            secret.to_string(),
            pool,
        )
    }

    #[tokio::test]
    async fn token_round_trips_the_user_id() {
        let auth = service("segredo-de-teste");
        let user_id = Uuid::new_v4();

        let token = auth.create_token(user_id).unwrap();
        assert_eq!(auth.decode_token(&token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let token = service("um-segredo").create_token(Uuid::new_v4()).unwrap();
        let result = service("outro-segredo").decode_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_of_a_deleted_user_is_unauthorized() {
        assert!(matches!(token_owner(None), Err(AppError::InvalidToken)));

        let user = User {
            id: Uuid::new_v4(),
            email: "dono@barbearia.com".into(),
            name: "Dono".into(),
            password_hash: "hash".into(),
            is_superadmin: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(token_owner(Some(user.clone())).unwrap().id, user.id);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let result = service("segredo").decode_token("nao.e.jwt");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
