use std::fs;
use std::path::Path;

pub const JAVA_ROOT: &str = "src/main/java";

/// Relative path of the controller in [`create_shop_project`].
pub const SHOP_CONTROLLER: &str = "src/main/java/com/shop/web/ProductController.java";

/// 1-based line inside `ProductController#update`.
pub const SHOP_UPDATE_LINE: u32 = 34;

/// Create a small Spring project with one controller, a service, a DTO
/// hierarchy and a library root holding a shared base type.
///
/// Returns the library root, which lives next to the project under `root`.
pub fn create_shop_project(root: &Path) -> std::path::PathBuf {
    let java = root.join("app").join(JAVA_ROOT);
    let web = java.join("com/shop/web");
    let service = java.join("com/shop/service");
    let dto = java.join("com/shop/dto");
    let library = root.join("lib-src");
    let shared = library.join("com/shop/shared");

    for dir in [&web, &service, &dto, &shared] {
        fs::create_dir_all(dir).unwrap();
    }

    fs::write(
        web.join("ProductController.java"),
        r#"package com.shop.web;

import com.shop.dto.ProductDto;
import com.shop.dto.UpdateProductRequest;
import com.shop.service.ProductService;
import org.springframework.web.bind.annotation.*;

import java.util.List;

@RestController
@RequestMapping("/products")
public class ProductController {
    private final ProductService productService;

    public ProductController(ProductService productService) {
        this.productService = productService;
    }

    @GetMapping
    public List<ProductDto> list() {
        return productService.list();
    }

    @GetMapping("/{id}")
    public ProductDto get(@PathVariable Long id) {
        return productService.get(id);
    }

    /**
     * Update name and price of a product.
     */
    @PutMapping("/{id}")
    public ProductDto update(@PathVariable Long id, @RequestBody UpdateProductRequest request) {
        productService.audit(id);
        return productService.update(id, request.normalized());
    }
}
"#,
    )
    .unwrap();

    fs::write(
        service.join("ProductService.java"),
        r#"package com.shop.service;

import com.shop.dto.ProductDto;
import com.shop.dto.UpdateProductRequest;
import com.shop.shared.Auditable;

import java.util.List;

public class ProductService extends Auditable {
    public List<ProductDto> list() {
        return List.of();
    }

    public ProductDto get(Long id) {
        return new ProductDto();
    }

    /** Apply the update and return the stored product. */
    public ProductDto update(Long id, UpdateProductRequest request) {
        return get(id);
    }
}
"#,
    )
    .unwrap();

    fs::write(
        dto.join("ProductDto.java"),
        r#"package com.shop.dto;

import com.shop.shared.Entity;

public class ProductDto extends Entity {
    /** display name */
    private String name;
    private Price price;
}
"#,
    )
    .unwrap();

    fs::write(
        dto.join("Price.java"),
        "package com.shop.dto;\n\npublic class Price {\n    private java.math.BigDecimal amount;\n    /** ISO 4217 code */\n    private String currency;\n}\n",
    )
    .unwrap();

    fs::write(
        dto.join("UpdateProductRequest.java"),
        r#"package com.shop.dto;

public class UpdateProductRequest {
    private String name;
    private Price price;

    public UpdateProductRequest normalized() {
        return this;
    }
}
"#,
    )
    .unwrap();

    fs::write(
        shared.join("Entity.java"),
        "package com.shop.shared;\n\npublic abstract class Entity {\n    /** primary key */\n    private Long id;\n}\n",
    )
    .unwrap();

    fs::write(
        shared.join("Auditable.java"),
        "package com.shop.shared;\n\npublic abstract class Auditable {\n    public void audit(Long id) {}\n}\n",
    )
    .unwrap();

    library
}

/// Create a project with `controllers` controller/service/DTO triples for
/// benchmarking. Every controller has five endpoints; every DTO nests one
/// level deep.
pub fn create_scaled_project(root: &Path, controllers: usize) {
    let java = root.join(JAVA_ROOT).join("com/bench");
    for pkg in ["web", "service", "dto"] {
        fs::create_dir_all(java.join(pkg)).unwrap();
    }

    for i in 0..controllers {
        fs::write(java.join("web").join(format!("Resource{i}Controller.java")), controller_source(i)).unwrap();

        fs::write(
            java.join("service").join(format!("Resource{i}Service.java")),
            format!(
                r#"package com.bench.service;

import com.bench.dto.Resource{i}Dto;

import java.util.List;

public class Resource{i}Service {{
    public List<Resource{i}Dto> findAll() {{
        return List.of();
    }}

    public Resource{i}Dto find(Long id) {{
        return new Resource{i}Dto();
    }}

    public Resource{i}Dto save(Resource{i}Dto dto) {{
        validate(dto);
        return dto;
    }}

    public void delete(Long id) {{}}

    private void validate(Resource{i}Dto dto) {{}}
}}
"#
            ),
        )
        .unwrap();

        fs::write(
            java.join("dto").join(format!("Resource{i}Dto.java")),
            format!(
                r#"package com.bench.dto;

public class Resource{i}Dto {{
    /** identifier */
    private Long id;
    private String name;
    private Detail{i} detail;
}}

class Detail{i} {{
    private String description;
    private Integer rank;
}}
"#
            ),
        )
        .unwrap();
    }
}

/// Source of controller `i` in [`create_scaled_project`].
pub fn controller_source(i: usize) -> String {
    format!(
        r#"package com.bench.web;

import com.bench.dto.Resource{i}Dto;
import com.bench.service.Resource{i}Service;
import org.springframework.web.bind.annotation.*;

import java.util.List;

@RestController
@RequestMapping("/api/resource{i}")
public class Resource{i}Controller {{
    private final Resource{i}Service service = new Resource{i}Service();

    @GetMapping
    public List<Resource{i}Dto> list() {{
        return service.findAll();
    }}

    @GetMapping("/{{id}}")
    public Resource{i}Dto get(@PathVariable Long id) {{
        return service.find(id);
    }}

    @PostMapping
    public Resource{i}Dto create(@RequestBody Resource{i}Dto dto) {{
        return service.save(dto);
    }}

    @PutMapping("/{{id}}")
    public Resource{i}Dto update(@PathVariable Long id, @RequestBody Resource{i}Dto dto) {{
        service.find(id);
        return service.save(dto);
    }}

    @DeleteMapping("/{{id}}")
    public void delete(@PathVariable Long id) {{
        service.delete(id);
    }}
}}
"#
    )
}

/// Relative path of controller `i` in [`create_scaled_project`].
pub fn scaled_controller_path(i: usize) -> String {
    format!("{JAVA_ROOT}/com/bench/web/Resource{i}Controller.java")
}

/// 1-based line inside the `update` endpoint of every scaled controller.
pub const SCALED_UPDATE_LINE: u32 = 31;
