// src/services/document_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{order::OrderDetail, shop::Barbershop},
    services::{order_service::OrderService, shop_service::ShopService},
};

const FONT_FAMILY: &str = "Roboto";

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("falha ao montar o PDF: {}", e))
}

/// Comprovante do pedido com QR code da chave PIX da loja.
#[derive(Clone)]
pub struct DocumentService {
    order_service: OrderService,
    shop_service: ShopService,
    fonts_dir: PathBuf,
}

impl DocumentService {
    pub fn new(order_service: OrderService, shop_service: ShopService, fonts_dir: PathBuf) -> Self {
        Self { order_service, shop_service, fonts_dir }
    }

    pub async fn order_receipt_pdf(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<u8>, AppError> {
        let detail = self.order_service.detail(conn, shop_id, order_id).await?;
        let shop = self.shop_service.get(shop_id).await?;

        // genpdf é síncrono e pesado; sai do runtime
        let fonts_dir = self.fonts_dir.clone();
        tokio::task::spawn_blocking(move || render_receipt(&fonts_dir, &shop, &detail))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task do PDF: {}", e))?
    }
}

fn render_receipt(
    fonts_dir: &std::path::Path,
    shop: &Barbershop,
    detail: &OrderDetail,
) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, FONT_FAMILY, None)
        .map_err(|_| AppError::FontNotFound(fonts_dir.display().to_string()))?;

    let order = &detail.header;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Pedido #{}", order.display_id));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(elements::Paragraph::new(shop.name.clone())
        .styled(style::Style::new().bold().with_font_size(18)));
    if let Some(phone) = &shop.phone {
        doc.push(elements::Paragraph::new(format!("Tel: {}", phone))
            .styled(style::Style::new().with_font_size(10)));
    }

    doc.push(elements::Break::new(1.5));
    doc.push(elements::Paragraph::new(format!("PEDIDO #{}", order.display_id))
        .styled(style::Style::new().bold().with_font_size(14)));
    doc.push(elements::Paragraph::new(format!("Data: {}", order.created_at.format("%d/%m/%Y"))));
    doc.push(elements::Paragraph::new(format!("Cliente: {}", order.customer_name)));
    doc.push(elements::Paragraph::new(format!("Status: {}", order.status.as_str())));
    doc.push(elements::Break::new(2));

    // --- ITENS ---
    // Pesos: Nome (4), Qtd (1), Unitário (2), Total (2)
    let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let bold = style::Style::new().bold();
    table.row()
        .element(elements::Paragraph::new("Produto").styled(bold))
        .element(elements::Paragraph::new("Qtd").styled(bold))
        .element(elements::Paragraph::new("Unitário").styled(bold))
        .element(elements::Paragraph::new("Total").styled(bold))
        .push()
        .map_err(pdf_error)?;

    for item in &detail.items {
        table.row()
            .element(elements::Paragraph::new(item.item_name.clone()))
            .element(elements::Paragraph::new(item.quantity.to_string()))
            .element(elements::Paragraph::new(format!("R$ {:.2}", item.unit_price)))
            .element(elements::Paragraph::new(format!("R$ {:.2}", item.line_total())))
            .push()
            .map_err(pdf_error)?;
    }

    doc.push(table);
    doc.push(elements::Break::new(2));

    let mut total = elements::Paragraph::new(format!("TOTAL: R$ {:.2}", order.total));
    total.set_alignment(genpdf::Alignment::Right);
    doc.push(total.styled(style::Style::new().bold().with_font_size(12)));

    // --- PIX ---
    // QR com a chave crua, não um BR Code completo
    if let Some(key) = shop.pix_key.as_deref().filter(|k| !k.trim().is_empty()) {
        doc.push(elements::Break::new(2));
        doc.push(elements::Paragraph::new("PAGAMENTO VIA PIX")
            .styled(style::Style::new().bold().with_font_size(12)));
        doc.push(elements::Paragraph::new(format!("Chave: {}", key)));
        doc.push(elements::Break::new(1));

        let code = QrCode::new(key.as_bytes()).map_err(pdf_error)?;
        let image_buffer = code.render::<Luma<u8>>().build();
        let pdf_image = elements::Image::from_dynamic_image(image::DynamicImage::ImageLuma8(image_buffer))
            .map_err(pdf_error)?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);
    }

    if let Some(address) = &shop.address {
        doc.push(elements::Break::new(2));
        doc.push(elements::Paragraph::new(address.clone())
            .styled(style::Style::new().italic().with_font_size(8)));
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::models::order::{Order, OrderStatus};

    #[test]
    fn missing_fonts_dir_is_reported() {
        let now = Utc::now();
        let shop = Barbershop {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Barbearia Centro".into(),
            slug: "barbearia-centro".into(),
            phone: None,
            address: None,
            pix_key: Some("pix@barbearia.com".into()),
            logo_url: None,
            primary_color: None,
            created_at: now,
            updated_at: now,
        };
        let detail = OrderDetail {
            header: Order {
                id: Uuid::new_v4(),
                barbershop_id: shop.id,
                client_id: None,
                display_id: 1,
                customer_name: "Pedro".into(),
                customer_phone: None,
                status: OrderStatus::Pending,
                total: Decimal::new(3995, 2),
                notes: None,
                created_at: now,
                updated_at: now,
            },
            items: vec![],
        };

        let result = render_receipt(std::path::Path::new("/nao/existe"), &shop, &detail);
        assert!(matches!(result, Err(AppError::FontNotFound(_))));
    }
}
